//! Profile panel: display name, bio, avatar, password, and sign out.

#[cfg(test)]
#[path = "profile_panel_test.rs"]
mod profile_panel_test;

use leptos::prelude::*;
use records::{Profile, ProfileUpdate};

use crate::components::toast_stack::{show_toast, toast_error};
use crate::state::auth::AuthState;
use crate::state::toast::{ToastKind, ToastState};

const MIN_PASSWORD_CHARS: usize = 6;

fn check_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("password must be at least 6 characters");
    }
    if password != confirm {
        return Err("passwords do not match");
    }
    Ok(())
}

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let profile = RwSignal::new(None::<Profile>);
    let display_name = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let load_into_form = move |p: Profile| {
        display_name.set(p.display_name.clone().unwrap_or_default());
        bio.set(p.bio.clone().unwrap_or_default());
        profile.set(Some(p));
    };

    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_profile().await {
                Ok(p) => load_into_form(p),
                Err(e) => toast_error(toasts, e),
            }
        });
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let update = ProfileUpdate { display_name: Some(display_name.get_untracked()), bio: Some(bio.get_untracked()) };
        let update = match update.validate() {
            Ok(u) => u,
            Err(e) => {
                toast_error(toasts, e.to_string());
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(&update).await {
                Ok(p) => {
                    load_into_form(p);
                    show_toast(toasts, ToastKind::Info, "Profile saved");
                }
                Err(e) => toast_error(toasts, e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (update, load_into_form);
    };

    let on_avatar = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use records::AvatarUpload;

            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as usize;
            if let Err(e) = AvatarUpload::validate(&file.type_(), size) {
                toast_error(toasts, e.to_string());
                return;
            }
            busy.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::api::upload_avatar(file).await {
                    Ok(p) => load_into_form(p),
                    Err(e) => toast_error(toasts, e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let next = password.get_untracked();
        if let Err(e) = check_password(&next, &confirm.get_untracked()) {
            toast_error(toasts, e);
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::change_password(&next).await {
                Ok(()) => {
                    password.set(String::new());
                    confirm.set(String::new());
                    show_toast(toasts, ToastKind::Info, "Password updated");
                }
                Err(e) => toast_error(toasts, e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = next;
    };

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(AuthState::signed_out);
        });
    };

    let avatar = move || {
        let current = profile.get();
        match current.as_ref().and_then(|p| p.avatar_url.clone()) {
            Some(url) => view! { <img class="avatar" src=url alt="Avatar"/> }.into_any(),
            None => {
                let initials = current.as_ref().map(Profile::initials).unwrap_or_default();
                view! { <span class="avatar avatar--initials">{initials}</span> }.into_any()
            }
        }
    };

    view! {
        <div class="profile">
            <div class="profile__identity">
                {avatar}
                <div>
                    <div class="profile__name">
                        {move || profile.with(|p| p.as_ref().map(Profile::display_label).unwrap_or_default())}
                    </div>
                    <div class="profile__email">
                        {move || auth.with(|a| a.user.as_ref().and_then(|u| u.email.clone()).unwrap_or_default())}
                    </div>
                </div>
                <label class="btn btn--ghost profile__upload">
                    "Change avatar"
                    <input type="file" accept="image/png,image/jpeg,image/gif,image/webp" hidden on:change=on_avatar/>
                </label>
            </div>

            <form class="profile__form" on:submit=on_save>
                <input
                    class="input"
                    type="text"
                    placeholder="Display name"
                    maxlength="64"
                    prop:value=move || display_name.get()
                    on:input=move |ev| display_name.set(event_target_value(&ev))
                />
                <textarea
                    class="input"
                    rows="3"
                    placeholder="Bio"
                    maxlength="280"
                    prop:value=move || bio.get()
                    on:input=move |ev| bio.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Save profile"
                </button>
            </form>

            <form class="profile__form" on:submit=on_password>
                <input
                    class="input"
                    type="password"
                    placeholder="New password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="input"
                    type="password"
                    placeholder="Confirm password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Change password"
                </button>
            </form>

            <button class="btn btn--danger" on:click=on_sign_out>
                "Sign out"
            </button>
        </div>
    }
}
