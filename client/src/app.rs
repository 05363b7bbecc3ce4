//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::state::{
    agenda::AgendaState, auth::AuthState, chat::ChatState, layout::LayoutState, missions::MissionsState,
    notes::NotesState, toast::ToastState, ui::UiState, vault::VaultState,
};
use crate::util::clock;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, restores browser-held data once
/// hydrated, and resolves the session before any route decides to redirect.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState::default());
    let missions = RwSignal::new(MissionsState::default());
    let agenda = RwSignal::new(AgendaState::new(clock::today(clock::local_offset())));
    let notes = RwSignal::new(NotesState::default());
    let vault = RwSignal::new(VaultState::default());
    let chat = RwSignal::new(ChatState::default());
    let layout = RwSignal::new(LayoutState::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(ui);
    provide_context(missions);
    provide_context(agenda);
    provide_context(notes);
    provide_context(vault);
    provide_context(chat);
    provide_context(layout);
    provide_context(toasts);

    // Effects only run in the browser, after hydration has matched the
    // server markup.
    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::{dark_mode, notify, persistence};

            let dark = dark_mode::read_preference();
            dark_mode::apply(dark);
            ui.set(UiState { dark_mode: dark, notifications: notify::permission() });

            notes.set(NotesState::from_stored(persistence::load_json(crate::state::notes::STORAGE_KEY)));
            vault.set(VaultState::from_stored(persistence::load_json(crate::state::vault::STORAGE_KEY)));
            layout.set(LayoutState::from_stored(persistence::load_json(crate::state::layout::STORAGE_KEY)));
            agenda.update(|a| a.select(clock::today(clock::local_offset())));

            leptos::task::spawn_local(async move {
                let user = crate::net::api::fetch_current_user().await;
                auth.update(|a| a.resolved(user));
            });
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/deskboard.css"/>
        <Title text="Deskboard"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
