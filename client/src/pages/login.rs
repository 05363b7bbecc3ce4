//! Login page: email + password sign-in, account creation, and password
//! reset requests.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_home_redirect;

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
    Reset,
}

impl Mode {
    fn heading(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Create account",
            Self::Reset => "Reset password",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Sign up",
            Self::Reset => "Send reset link",
        }
    }
}

/// Mirror of the server's checks so obvious mistakes never leave the page.
fn check_form(mode: Mode, email: &str, password: &str) -> Result<(), &'static str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err("Enter a valid email address."),
    }
    if mode != Mode::Reset && password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 6 characters.");
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_home_redirect(auth, use_navigate());

    let mode = RwSignal::new(Mode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = mode.get_untracked();
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        if let Err(message) = check_form(current, &email_value, &password_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api;
            match current {
                Mode::SignIn => match api::sign_in(&email_value, &password_value).await {
                    Ok(user) => auth.update(|a| a.resolved(Some(user))),
                    Err(e) => info.set(e),
                },
                Mode::SignUp => match api::sign_up(&email_value, &password_value).await {
                    Ok(reply) if reply.confirmation_required => {
                        info.set("Check your inbox to confirm the account, then sign in.".to_owned());
                        mode.set(Mode::SignIn);
                    }
                    Ok(reply) => auth.update(|a| a.resolved(Some(reply.user))),
                    Err(e) => info.set(e),
                },
                Mode::Reset => match api::request_password_reset(&email_value).await {
                    Ok(()) => {
                        info.set("If that address has an account, a reset link is on its way.".to_owned());
                        mode.set(Mode::SignIn);
                    }
                    Err(e) => info.set(e),
                },
            }
            password.set(String::new());
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, password_value);
    };

    let switch = move |next: Mode| {
        mode.set(next);
        info.set(String::new());
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Deskboard"</h1>
                <p class="login-card__subtitle">{move || mode.get().heading()}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() != Mode::Reset>
                        <input
                            class="input"
                            type="password"
                            placeholder="Password"
                            autocomplete=move || {
                                if mode.get() == Mode::SignUp { "new-password" } else { "current-password" }
                            }
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || mode.get().submit_label()}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-links">
                    <Show when=move || mode.get() != Mode::SignIn>
                        <button class="btn btn--link" on:click=move |_| switch(Mode::SignIn)>
                            "Have an account? Sign in"
                        </button>
                    </Show>
                    <Show when=move || mode.get() != Mode::SignUp>
                        <button class="btn btn--link" on:click=move |_| switch(Mode::SignUp)>
                            "New here? Create an account"
                        </button>
                    </Show>
                    <Show when=move || mode.get() == Mode::SignIn>
                        <button class="btn btn--link" on:click=move |_| switch(Mode::Reset)>
                            "Forgot password?"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
