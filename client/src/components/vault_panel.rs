//! Vault panel: saved links with category filter and search.

use leptos::prelude::*;

use crate::components::toast_stack::toast_error;
use crate::state::toast::ToastState;
use crate::state::vault::{STORAGE_KEY, VaultState};
use crate::util::{clock, persistence};

fn persist(vault: RwSignal<VaultState>) {
    vault.with_untracked(|v| persistence::save_json(STORAGE_KEY, &v.links));
}

#[component]
pub fn VaultPanel() -> impl IntoView {
    let vault = expect_context::<RwSignal<VaultState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let title = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (t, u, c) = (title.get_untracked(), url.get_untracked(), category.get_untracked());
        match vault.try_update(|v| v.add(&t, &u, &c, clock::now())) {
            Some(Ok(())) => {
                persist(vault);
                title.set(String::new());
                url.set(String::new());
            }
            Some(Err(e)) => toast_error(toasts, e.to_string()),
            None => {}
        }
    };

    let links = move || {
        let visible = vault.with(VaultState::visible);
        if visible.is_empty() {
            let text = if vault.with(|v| v.links.is_empty()) { "No links saved." } else { "No matches." };
            return view! { <li class="panel-empty">{text}</li> }.into_any();
        }
        visible
            .into_iter()
            .map(|link| {
                let id = link.id.clone();
                view! {
                    <li class="vault__link">
                        <a href=link.url.clone() target="_blank" rel="noopener noreferrer" title=link.url.clone()>
                            {link.title}
                        </a>
                        <span class="badge">{link.category}</span>
                        <button
                            class="btn btn--ghost"
                            title="Remove link"
                            on:click=move |_| {
                                vault.update(|v| v.remove(&id));
                                persist(vault);
                            }
                        >
                            "✕"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="vault">
            <form class="vault__form" on:submit=on_submit>
                <input
                    class="input"
                    type="text"
                    placeholder="example.com/page"
                    prop:value=move || url.get()
                    on:input=move |ev| url.set(event_target_value(&ev))
                />
                <div class="vault__form-row">
                    <input
                        class="input"
                        type="text"
                        placeholder="Title (optional)"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <input
                        class="input"
                        type="text"
                        placeholder="Category"
                        list="vault-categories"
                        prop:value=move || category.get()
                        on:input=move |ev| category.set(event_target_value(&ev))
                    />
                    <datalist id="vault-categories">
                        {move || {
                            vault
                                .with(VaultState::categories)
                                .into_iter()
                                .map(|c| view! { <option value=c></option> })
                                .collect::<Vec<_>>()
                        }}
                    </datalist>
                    <button class="btn btn--primary" type="submit">"Save"</button>
                </div>
            </form>

            <div class="vault__filters">
                <select
                    class="input"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        vault.update(|v| v.category = if value.is_empty() { None } else { Some(value) });
                    }
                >
                    <option value="" selected=move || vault.with(|v| v.category.is_none())>
                        "All categories"
                    </option>
                    {move || {
                        let active = vault.with(|v| v.category.clone());
                        vault
                            .with(VaultState::categories)
                            .into_iter()
                            .map(|c| {
                                let selected = active.as_deref() == Some(c.as_str());
                                view! { <option value=c.clone() selected=selected>{c.clone()}</option> }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <input
                    class="input"
                    type="search"
                    placeholder="Search links"
                    prop:value=move || vault.with(|v| v.query.clone())
                    on:input=move |ev| vault.update(|v| v.query = event_target_value(&ev))
                />
            </div>

            <ul class="vault__list">{links}</ul>
        </div>
    }
}
