//! Browser notifications for mission reminders.
//!
//! Everything here degrades to a no-op when the Notification API is missing
//! or permission is not granted; the reminder poller falls back to a toast.

use crate::state::ui::NotifyPermission;

#[cfg(feature = "hydrate")]
fn supported() -> bool {
    web_sys::window().is_some_and(|w| js_sys::Reflect::has(&w, &"Notification".into()).unwrap_or(false))
}

/// Current permission without prompting.
pub fn permission() -> NotifyPermission {
    #[cfg(feature = "hydrate")]
    {
        use web_sys::NotificationPermission;
        if !supported() {
            return NotifyPermission::Unsupported;
        }
        match web_sys::Notification::permission() {
            NotificationPermission::Granted => NotifyPermission::Granted,
            NotificationPermission::Denied => NotifyPermission::Denied,
            NotificationPermission::Default => NotifyPermission::Prompt,
            _ => NotifyPermission::Unsupported,
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        NotifyPermission::Unsupported
    }
}

/// Ask the browser for permission. Must run from a user gesture.
pub async fn request_permission() -> NotifyPermission {
    #[cfg(feature = "hydrate")]
    {
        if !supported() {
            return NotifyPermission::Unsupported;
        }
        let Ok(promise) = web_sys::Notification::request_permission() else {
            return permission();
        };
        match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(answer) => NotifyPermission::parse(&answer.as_string().unwrap_or_default()),
            Err(_) => permission(),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        NotifyPermission::Unsupported
    }
}

/// Show a notification. Returns `false` when nothing was shown.
pub fn show(title: &str, body: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        if permission() != NotifyPermission::Granted {
            return false;
        }
        let options = web_sys::NotificationOptions::new();
        options.set_body(body);
        options.set_tag(title);
        match web_sys::Notification::new_with_options(title, &options) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("notification failed: {e:?}");
                false
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (title, body);
        false
    }
}
