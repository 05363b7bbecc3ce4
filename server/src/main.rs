mod config;
mod error;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;
mod supabase;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::llm::LlmChat;

#[tokio::main]
async fn main() {
    // A missing .env is normal in production.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "deskboard failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = config::AppConfig::from_env().map_err(|e| e.to_string())?;
    let supabase = supabase::SupabaseClient::new(&config.supabase).map_err(|e| e.to_string())?;

    // Non-fatal: the assistant panel reports 503 when the key is missing.
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, assistant disabled");
            None
        }
    };

    let port = config.port;
    let state = state::AppState::new(config, supabase, llm);
    let app = routes::app(state)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| format!("bind port {port}: {e}"))?;
    tracing::info!(%port, "deskboard listening");
    axum::serve(listener, app).await.map_err(|e| format!("server error: {e}"))
}
