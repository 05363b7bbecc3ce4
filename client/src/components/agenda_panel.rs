//! Agenda panel: month grid, the selected day's events, an add form, and the
//! next few upcoming events.

use chrono::{Datelike, Duration, NaiveDate};
use leptos::prelude::*;
use records::agenda::{month_grid, upcoming};
use records::{AgendaDraft, AgendaEvent};

use crate::components::toast_stack::toast_error;
use crate::state::agenda::AgendaState;
use crate::state::toast::ToastState;
use crate::util::clock;

const UPCOMING_LIMIT: usize = 5;
const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

fn event_when(event: &AgendaEvent, offset: chrono::FixedOffset) -> String {
    if event.all_day {
        "all day".to_owned()
    } else {
        format!("{}–{}", clock::time_label(event.starts_at, offset), clock::time_label(event.ends_at, offset))
    }
}

#[component]
pub fn AgendaPanel() -> impl IntoView {
    let agenda = expect_context::<RwSignal<AgendaState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let title = RwSignal::new(String::new());
    let starts = RwSignal::new(String::new());
    let ends = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let all_day = RwSignal::new(false);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        agenda.update(|a| a.loading = true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::list_events().await {
                Ok(events) => agenda.update(|a| a.replace(events)),
                Err(e) => {
                    agenda.update(|a| a.failed(e.clone()));
                    toast_error(toasts, e);
                }
            }
        });
    });

    // Prefill the form with a one-hour slot on the selected day.
    let prefill = move |date: NaiveDate| {
        let offset = clock::local_offset();
        let start = date.and_hms_opt(9, 0, 0).and_then(|t| t.and_local_timezone(offset).single());
        if let Some(start) = start {
            let start = start.to_utc();
            starts.set(clock::to_input_value(start, offset));
            ends.set(clock::to_input_value(start + Duration::hours(1), offset));
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let offset = clock::local_offset();
        let (Some(starts_at), Some(ends_at)) = (
            clock::from_input_value(&starts.get_untracked(), offset),
            clock::from_input_value(&ends.get_untracked(), offset),
        ) else {
            toast_error(toasts, "pick a start and end time");
            return;
        };
        let draft = AgendaDraft {
            title: title.get_untracked(),
            starts_at,
            ends_at,
            location: Some(location.get_untracked()),
            all_day: all_day.get_untracked(),
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
            match crate::net::api::create_event(&draft).await {
                Ok(event) => {
                    agenda.update(|a| a.insert(event));
                    title.set(String::new());
                    location.set(String::new());
                    all_day.set(false);
                }
                Err(e) => toast_error(toasts, e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = draft;
    };

    let remove = move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_event(&id).await {
                Ok(()) => {
                    agenda.update(|a| {
                        a.remove(&id);
                    });
                }
                Err(e) => toast_error(toasts, e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let grid = move || {
        let offset = clock::local_offset();
        let today = clock::today(offset);
        let state = agenda.get();
        let (year, month) = state.month;
        month_grid(year, month)
            .into_iter()
            .map(|week| {
                let cells = week
                    .into_iter()
                    .map(|cell| match cell {
                        None => view! { <span class="agenda__cell agenda__cell--blank"></span> }.into_any(),
                        Some(date) => {
                            let is_selected = date == state.selected;
                            let is_today = date == today;
                            let busy_day = state.has_events(date, offset);
                            view! {
                                <button
                                    class="agenda__cell"
                                    class:agenda__cell--selected=is_selected
                                    class:agenda__cell--today=is_today
                                    class:agenda__cell--busy=busy_day
                                    on:click=move |_| {
                                        agenda.update(|a| a.select(date));
                                        prefill(date);
                                    }
                                >
                                    {date.day()}
                                </button>
                            }
                                .into_any()
                        }
                    })
                    .collect::<Vec<_>>();
                view! { <div class="agenda__week">{cells}</div> }
            })
            .collect::<Vec<_>>()
    };

    let day_list = move || {
        let offset = clock::local_offset();
        let events = agenda.with(|a| a.day_events(offset));
        if events.is_empty() {
            return view! { <li class="panel-empty">"Nothing scheduled."</li> }.into_any();
        }
        events
            .into_iter()
            .map(|event| {
                let id = event.id.clone();
                let when = event_when(&event, offset);
                view! {
                    <li class="agenda__event">
                        <span class="agenda__time">{when}</span>
                        <span class="agenda__event-title">{event.title}</span>
                        {event.location.map(|l| view! { <span class="agenda__location">{l}</span> })}
                        <button class="btn btn--ghost" title="Delete event" on:click=move |_| remove(id.clone())>
                            "✕"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    let upcoming_list = move || {
        let offset = clock::local_offset();
        agenda.with(|a| upcoming(&a.events, clock::now(), UPCOMING_LIMIT))
            .into_iter()
            .map(|event| {
                let date = event.local_date(offset);
                let label = format!("{} · {}", date.format("%a %b %-d"), event_when(&event, offset));
                view! {
                    <li class="agenda__upcoming-item" on:click=move |_| agenda.update(|a| a.select(date))>
                        <span class="agenda__time">{label}</span>
                        <span>{event.title}</span>
                    </li>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="agenda">
            <div class="agenda__nav">
                <button class="btn btn--ghost" title="Previous month" on:click=move |_| agenda.update(|a| a.shift_month(-1))>
                    "‹"
                </button>
                <span class="agenda__month">{move || agenda.with(AgendaState::month_label)}</span>
                <button class="btn btn--ghost" title="Next month" on:click=move |_| agenda.update(|a| a.shift_month(1))>
                    "›"
                </button>
                <button
                    class="btn btn--ghost"
                    on:click=move |_| agenda.update(|a| a.select(clock::today(clock::local_offset())))
                >
                    "Today"
                </button>
            </div>
            <div class="agenda__weekdays">
                {WEEKDAYS.into_iter().map(|d| view! { <span>{d}</span> }).collect::<Vec<_>>()}
            </div>
            <div class="agenda__grid">{grid}</div>

            <h3 class="agenda__heading">{move || agenda.with(|a| a.selected.format("%A, %B %-d").to_string())}</h3>
            <ul class="agenda__day">{day_list}</ul>

            <form class="agenda__form" on:submit=on_submit>
                <input
                    class="input"
                    type="text"
                    placeholder="New event"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <div class="agenda__form-row">
                    <input
                        class="input"
                        type="datetime-local"
                        title="Starts"
                        prop:value=move || starts.get()
                        on:input=move |ev| starts.set(event_target_value(&ev))
                    />
                    <input
                        class="input"
                        type="datetime-local"
                        title="Ends"
                        prop:value=move || ends.get()
                        on:input=move |ev| ends.set(event_target_value(&ev))
                    />
                </div>
                <div class="agenda__form-row">
                    <input
                        class="input"
                        type="text"
                        placeholder="Location"
                        prop:value=move || location.get()
                        on:input=move |ev| location.set(event_target_value(&ev))
                    />
                    <label class="field field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || all_day.get()
                            on:change=move |ev| all_day.set(event_target_checked(&ev))
                        />
                        "All day"
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Add"
                    </button>
                </div>
            </form>

            <h3 class="agenda__heading">"Upcoming"</h3>
            <ul class="agenda__upcoming">{upcoming_list}</ul>
        </div>
    }
}
