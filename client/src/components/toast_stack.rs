//! Corner stack of transient notices.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

#[cfg(feature = "hydrate")]
const AUTO_DISMISS_SECS: u64 = 6;

/// Push a toast and schedule its removal. A collapsed repeat gets a new id,
/// so its deadline restarts from now.
pub fn show_toast(toasts: RwSignal<ToastState>, kind: ToastKind, text: impl Into<String>) {
    let id = toasts.try_update(|t| t.push(kind, text)).unwrap_or_default();
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_secs(AUTO_DISMISS_SECS)).await;
        toasts.update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

pub fn toast_error(toasts: RwSignal<ToastState>, text: impl Into<String>) {
    show_toast(toasts, ToastKind::Error, text);
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let is_error = toast.kind == ToastKind::Error;
                        view! {
                            <div
                                class="toast"
                                class:toast--error=is_error
                                role="status"
                                on:click=move |_| toasts.update(|t| t.dismiss(id))
                            >
                                {toast.text}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
