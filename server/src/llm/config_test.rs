use super::*;

/// # Safety
/// The scenarios below share process-wide env vars, so they run inside a
/// single test function.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_BASE_URL");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("TEST_GEMINI_KEY");
    }
}

#[test]
fn from_env_scenarios() {
    unsafe { clear_llm_env() };
    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "GEMINI_API_KEY"));

    unsafe { std::env::set_var("GEMINI_API_KEY", "secret") };
    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );

    unsafe {
        std::env::set_var("LLM_API_KEY_ENV", "TEST_GEMINI_KEY");
        std::env::set_var("TEST_GEMINI_KEY", "other");
        std::env::set_var("LLM_MODEL", "gemini-1.5-pro");
        std::env::set_var("LLM_BASE_URL", "https://proxy.test/v1beta/");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "bogus");
    }
    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "other");
    assert_eq!(cfg.model, "gemini-1.5-pro");
    assert_eq!(cfg.base_url, "https://proxy.test/v1beta");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS });

    unsafe { std::env::set_var("TEST_GEMINI_KEY", "   ") };
    assert!(matches!(LlmConfig::from_env(), Err(LlmError::MissingApiKey { .. })));

    unsafe { clear_llm_env() };
}
