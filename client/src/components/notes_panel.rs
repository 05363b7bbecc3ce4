//! Notes panel: note list, markdown editor, and rendered preview.
//!
//! Notes are stored in localStorage only; every mutation writes the whole
//! list back.

use leptos::prelude::*;

use crate::components::toast_stack::toast_error;
use crate::state::notes::{NotesState, STORAGE_KEY};
use crate::state::toast::ToastState;
use crate::util::{clock, markdown, persistence};

const PREVIEW_CHARS: usize = 60;

fn persist(notes: RwSignal<NotesState>) {
    notes.with_untracked(|n| persistence::save_json(STORAGE_KEY, &n.notes));
}

#[component]
pub fn NotesPanel() -> impl IntoView {
    let notes = expect_context::<RwSignal<NotesState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());

    // Load the selected note into the editor whenever the selection changes.
    let selected_id = Memo::new(move |_| notes.with(|n| n.selected.clone()));
    Effect::new(move || {
        selected_id.track();
        let (t, b) = notes.with_untracked(|n| {
            n.selected_note()
                .map(|note| (note.title.clone(), note.body.clone()))
                .unwrap_or_default()
        });
        title.set(t);
        body.set(b);
    });

    let on_save = move |_| {
        let (t, b) = (title.get_untracked(), body.get_untracked());
        match notes.try_update(|n| n.save(&t, &b, clock::now())) {
            Some(Ok(())) => persist(notes),
            Some(Err(e)) => toast_error(toasts, e.to_string()),
            None => {}
        }
    };

    let on_delete = move |_| {
        if let Some(id) = notes.with_untracked(|n| n.selected.clone()) {
            notes.update(|n| n.remove(&id));
            persist(notes);
        }
    };

    let list = move || {
        let state = notes.get();
        if state.notes.is_empty() {
            return view! { <li class="panel-empty">"No notes yet."</li> }.into_any();
        }
        state
            .notes
            .iter()
            .map(|note| {
                let select_id = note.id.clone();
                let pin_id = note.id.clone();
                let is_selected = state.selected.as_deref() == Some(note.id.as_str());
                let pinned = note.pinned;
                let pin_label = if pinned { "Unpin" } else { "Pin" };
                view! {
                    <li class="notes__item" class:notes__item--selected=is_selected>
                        <button
                            class="notes__item-main"
                            on:click=move |_| notes.update(|n| {
                                n.selected = Some(select_id.clone());
                                n.preview = false;
                            })
                        >
                            <span class="notes__item-title">{note.heading()}</span>
                            <span class="notes__item-preview">{note.preview(PREVIEW_CHARS)}</span>
                        </button>
                        <button
                            class="btn btn--ghost"
                            class:notes__pin--on=pinned
                            title=pin_label
                            on:click=move |_| {
                                notes.update(|n| n.toggle_pin(&pin_id));
                                persist(notes);
                            }
                        >
                            "📌"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="notes">
            <ul class="notes__list">{list}</ul>
            <div class="notes__editor">
                <div class="notes__toolbar">
                    <button class="btn btn--ghost" on:click=move |_| notes.update(NotesState::compose)>
                        "New"
                    </button>
                    <button class="btn btn--ghost" on:click=move |_| notes.update(|n| n.preview = !n.preview)>
                        {move || if notes.with(|n| n.preview) { "Edit" } else { "Preview" }}
                    </button>
                    <span class="toolbar__spacer"></span>
                    <Show when=move || notes.with(|n| n.selected.is_some())>
                        <button class="btn btn--ghost" on:click=on_delete>"Delete"</button>
                    </Show>
                    <button class="btn btn--primary" on:click=on_save>"Save"</button>
                </div>
                <input
                    class="input"
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <Show
                    when=move || notes.with(|n| n.preview)
                    fallback=move || {
                        view! {
                            <textarea
                                class="input notes__body"
                                placeholder="Write in markdown..."
                                prop:value=move || body.get()
                                on:input=move |ev| body.set(event_target_value(&ev))
                            ></textarea>
                        }
                    }
                >
                    <div class="notes__preview markdown" inner_html=move || markdown::render_html(&body.get())></div>
                </Show>
            </div>
        </div>
    }
}
