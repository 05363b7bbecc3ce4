//! Dashboard page: header, the card grid, and the reminder poller.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It owns gesture tracking for the
//! grid (cards only start gestures) and runs the reminder poll loop for as
//! long as the page is mounted.
//!
//! REMINDERS
//! =========
//! Every `REMINDER_POLL_SECS` the poller takes the due reminders from
//! `MissionsState`, which marks them reminded locally, then fires a browser
//! notification (or a toast when notifications are unavailable) and persists
//! `reminded = true` with a `PATCH`. A failed write is only logged: the local
//! flag already guarantees the alert fires once per page session.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use records::PanelKind;
use records::layout::GRID_COLUMNS;

use crate::components::agenda_panel::AgendaPanel;
use crate::components::card::Card;
use crate::components::chat_panel::ChatPanel;
use crate::components::missions_panel::MissionsPanel;
use crate::components::notes_panel::NotesPanel;
use crate::components::profile_panel::ProfilePanel;
use crate::components::toast_stack::ToastStack;
use crate::components::vault_panel::VaultPanel;
use crate::state::auth::AuthState;
use crate::state::layout::{LayoutState, STORAGE_KEY};
use crate::state::missions::MissionsState;
use crate::state::toast::ToastState;
use crate::state::ui::UiState;
use crate::util::auth::install_unauth_redirect;
use crate::util::{clock, persistence};

#[cfg(feature = "hydrate")]
const REMINDER_POLL_SECS: u64 = 5;

/// Width of one grid column in pixels, given the grid's client width.
fn column_px(grid_width: f64) -> f64 {
    grid_width / f64::from(GRID_COLUMNS)
}

#[cfg(any(test, feature = "hydrate"))]
fn notification_title(mission_title: &str) -> String {
    format!("Mission reminder: {mission_title}")
}

fn header_summary(open: usize, overdue: usize) -> String {
    match (open, overdue) {
        (0, _) => "All clear".to_owned(),
        (n, 0) => format!("{n} open"),
        (n, o) => format!("{n} open, {o} overdue"),
    }
}

#[cfg(feature = "hydrate")]
fn poll_reminders(missions: RwSignal<MissionsState>, toasts: RwSignal<ToastState>) {
    use crate::components::toast_stack::show_toast;
    use crate::state::toast::ToastKind;

    let alerts = missions.try_update(|m| m.take_due(clock::now())).unwrap_or_default();
    if alerts.is_empty() {
        return;
    }
    let offset = clock::local_offset();
    for alert in alerts {
        let title = notification_title(&alert.title);
        let body = alert.body(offset);
        if !crate::util::notify::show(&title, &body) {
            show_toast(toasts, ToastKind::Info, format!("{title} ({body})"));
        }
        let id = alert.mission_id;
        leptos::task::spawn_local(async move {
            match crate::net::api::update_mission(&id, &records::MissionPatch::reminded()).await {
                Ok(mission) => missions.update(|m| m.upsert(mission)),
                Err(e) => log::warn!("could not record reminder for {id}: {e}"),
            }
        });
    }
}

fn panel_view(panel: PanelKind) -> AnyView {
    match panel {
        PanelKind::Missions => view! { <MissionsPanel/> }.into_any(),
        PanelKind::Agenda => view! { <AgendaPanel/> }.into_any(),
        PanelKind::Notes => view! { <NotesPanel/> }.into_any(),
        PanelKind::Vault => view! { <VaultPanel/> }.into_any(),
        PanelKind::Chat => view! { <ChatPanel/> }.into_any(),
        PanelKind::Profile => view! { <ProfilePanel/> }.into_any(),
    }
}

/// Dashboard page: shows the panel grid.
/// Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let layout = expect_context::<RwSignal<LayoutState>>();
    let missions = expect_context::<RwSignal<MissionsState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_unauth_redirect(auth, use_navigate());

    #[cfg(feature = "hydrate")]
    {
        let poll_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let poll_alive_task = poll_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(REMINDER_POLL_SECS)).await;
                if !poll_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if !auth.get_untracked().is_signed_in() || !missions.with_untracked(|m| m.loaded) {
                    continue;
                }
                poll_reminders(missions, toasts);
            }
        });
        on_cleanup(move || poll_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = toasts;

    let grid_ref = NodeRef::<leptos::html::Div>::new();

    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        if layout.with_untracked(|l| l.gesture.is_none()) {
            return;
        }
        let Some(grid) = grid_ref.get_untracked() else {
            return;
        };
        let cell = column_px(f64::from(grid.client_width()));
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        layout.update(|l| l.track(x, y, cell));
    };

    let finish_gesture = move || {
        if layout.try_update(LayoutState::end) == Some(true) {
            layout.with_untracked(|l| persistence::save_json(STORAGE_KEY, &l.cards));
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            layout.update(LayoutState::cancel);
        }
    };

    let on_reset_layout = move |_| {
        layout.update(LayoutState::reset);
        persistence::remove(STORAGE_KEY);
    };

    let on_enable_notifications = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let permission = crate::util::notify::request_permission().await;
            ui.update(|u| u.notifications = permission);
        });
    };

    let summary = move || {
        let now = clock::now();
        missions.with(|m| header_summary(m.open_count(), m.overdue_count(now)))
    };

    view! {
        <Show
            when=move || auth.with(AuthState::is_signed_in)
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page" tabindex="-1" on:keydown=on_keydown>
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__brand">"Deskboard"</span>
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    <span class="toolbar__summary">{summary}</span>

                    <span class="toolbar__spacer"></span>

                    <Show when=move || ui.with(|u| u.notifications.can_ask())>
                        <button class="btn" on:click=on_enable_notifications title="Allow reminder notifications">
                            "Enable reminders"
                        </button>
                    </Show>
                    <button class="btn" on:click=on_reset_layout title="Restore the default card layout">
                        "Reset layout"
                    </button>
                    <button
                        class="btn toolbar__dark-toggle"
                        on:click=move |_| {
                            let next = crate::util::dark_mode::toggle(ui.get_untracked().dark_mode);
                            ui.update(|u| u.dark_mode = next);
                        }
                        title="Toggle dark mode"
                    >
                        {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                    </button>

                    <span class="toolbar__self">{move || auth.with(AuthState::label)}</span>
                </header>

                <div
                    class="dashboard-page__grid"
                    class:dashboard-page__grid--gesture=move || layout.with(|l| l.gesture.is_some())
                    node_ref=grid_ref
                    on:pointermove=on_pointer_move
                    on:pointerup=move |_| finish_gesture()
                    on:pointerleave=move |_| finish_gesture()
                    on:pointercancel=move |_| layout.update(LayoutState::cancel)
                >
                    {PanelKind::ALL
                        .into_iter()
                        .map(|panel| view! { <Card panel=panel>{panel_view(panel)}</Card> })
                        .collect::<Vec<_>>()}
                </div>
                <ToastStack/>
            </div>
        </Show>
    }
}
