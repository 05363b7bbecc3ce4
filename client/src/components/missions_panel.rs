//! Missions panel: quick-add form and the sorted mission list.
//!
//! Every change goes through `/api/missions` and the returned row replaces
//! the local copy, so the list always shows what the server stored.

use leptos::prelude::*;
use records::{MissionDraft, Priority};

use crate::components::toast_stack::toast_error;
use crate::state::missions::MissionsState;
use crate::state::toast::ToastState;
use crate::util::clock;

#[component]
pub fn MissionsPanel() -> impl IntoView {
    let missions = expect_context::<RwSignal<MissionsState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let title = RwSignal::new(String::new());
    let priority = RwSignal::new(Priority::Medium);
    let deadline = RwSignal::new(String::new());
    let reminder = RwSignal::new(String::new());
    let show_done = RwSignal::new(true);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if missions.with_untracked(|m| m.loaded || m.loading) {
            return;
        }
        missions.update(|m| m.loading = true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::list_missions().await {
                Ok(items) => missions.update(|m| m.replace(items)),
                Err(e) => {
                    missions.update(|m| m.failed(e.clone()));
                    toast_error(toasts, e);
                }
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let offset = clock::local_offset();
        let draft = MissionDraft {
            title: title.get_untracked(),
            notes: None,
            priority: priority.get_untracked(),
            deadline: clock::from_input_value(&deadline.get_untracked(), offset),
            reminder_at: clock::from_input_value(&reminder.get_untracked(), offset),
        };
        let draft = match draft.validate() {
            Ok(d) => d,
            Err(e) => {
                toast_error(toasts, e.to_string());
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_mission(&draft).await {
                Ok(mission) => {
                    missions.update(|m| m.upsert(mission));
                    title.set(String::new());
                    deadline.set(String::new());
                    reminder.set(String::new());
                    priority.set(Priority::Medium);
                }
                Err(e) => toast_error(toasts, e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = draft;
    };

    let toggle = move |id: String| {
        let Some(change) = missions.try_update(|m| m.toggle(&id)).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_mission(&id, &change).await {
                Ok(mission) => missions.update(|m| m.upsert(mission)),
                Err(e) => {
                    missions.update(|m| {
                        m.toggle(&id);
                    });
                    toast_error(toasts, e);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, change);
    };

    let remove = move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_mission(&id).await {
                Ok(()) => {
                    missions.update(|m| {
                        m.remove(&id);
                    });
                }
                Err(e) => toast_error(toasts, e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let summary = move || {
        let now = clock::now();
        missions.with(|m| {
            let overdue = m.overdue_count(now);
            if overdue > 0 {
                format!("{} open · {overdue} overdue", m.open_count())
            } else {
                format!("{} open", m.open_count())
            }
        })
    };

    view! {
        <div class="missions">
            <form class="missions__form" on:submit=on_submit>
                <input
                    class="input"
                    type="text"
                    placeholder="New mission"
                    maxlength="200"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <div class="missions__form-row">
                    <select
                        class="input"
                        title="Priority"
                        on:change=move |ev| {
                            if let Some(p) = Priority::parse(&event_target_value(&ev)) {
                                priority.set(p);
                            }
                        }
                    >
                        {Priority::ALL
                            .into_iter()
                            .map(|p| {
                                view! {
                                    <option value=p.as_str() selected=move || priority.get() == p>
                                        {p.as_str()}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                    <label class="field">
                        <span>"Due"</span>
                        <input
                            class="input"
                            type="datetime-local"
                            prop:value=move || deadline.get()
                            on:input=move |ev| deadline.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Remind"</span>
                        <input
                            class="input"
                            type="datetime-local"
                            prop:value=move || reminder.get()
                            on:input=move |ev| reminder.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Add"
                    </button>
                </div>
            </form>

            <div class="missions__summary">
                <span>{summary}</span>
                <label class="missions__toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || show_done.get()
                        on:change=move |ev| show_done.set(event_target_checked(&ev))
                    />
                    "Show done"
                </label>
            </div>

            <ul class="missions__list">
                {move || {
                    let state = missions.get();
                    if state.loading && state.items.is_empty() {
                        return view! { <li class="panel-empty">"Loading missions..."</li> }.into_any();
                    }
                    if state.items.is_empty() {
                        return view! { <li class="panel-empty">"No missions yet."</li> }.into_any();
                    }
                    let now = clock::now();
                    let offset = clock::local_offset();
                    let include_done = show_done.get();
                    state
                        .items
                        .into_iter()
                        .filter(|m| include_done || !m.completed)
                        .map(|mission| {
                            let overdue = mission.is_overdue(now);
                            let completed = mission.completed;
                            let toggle_id = mission.id.clone();
                            let delete_id = mission.id.clone();
                            let due = mission.deadline.map(|d| format!("due {}", clock::short_label(d, offset)));
                            let remind = mission
                                .reminder_at
                                .filter(|_| !mission.reminded && !completed)
                                .map(|r| format!("⏰ {}", clock::short_label(r, offset)));
                            let priority_class = format!("badge badge--{}", mission.priority.as_str());
                            view! {
                                <li
                                    class="mission"
                                    class:mission--done=completed
                                    class:mission--overdue=overdue
                                >
                                    <input
                                        type="checkbox"
                                        title="Toggle done"
                                        prop:checked=completed
                                        on:change=move |_| toggle(toggle_id.clone())
                                    />
                                    <div class="mission__main">
                                        <span class="mission__title">{mission.title}</span>
                                        <span class="mission__meta">
                                            <span class=priority_class>{mission.priority.as_str()}</span>
                                            {due.map(|d| view! { <span>{d}</span> })}
                                            {remind.map(|r| view! { <span>{r}</span> })}
                                        </span>
                                    </div>
                                    <button
                                        class="btn btn--ghost"
                                        title="Delete mission"
                                        on:click=move |_| remove(delete_id.clone())
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </ul>
        </div>
    }
}
