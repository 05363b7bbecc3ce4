//! Assistant panel: conversation transcript and prompt input.
//!
//! Model replies are rendered as markdown with raw HTML stripped; user turns
//! are shown as plain text.

use leptos::prelude::*;
use records::ChatRole;

use crate::state::chat::ChatState;
use crate::util::markdown;

#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest turn in view.
    Effect::new(move || {
        let _ = chat.with(|c| (c.turns.len(), c.pending));
        #[cfg(feature = "hydrate")]
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let do_send = move || {
        let raw = input.get_untracked();
        let Some(request) = chat.try_update(|c| c.begin(&raw)).flatten() else {
            return;
        };
        input.set(String::new());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::send_chat(&request).await.map(|reply| reply.text);
            chat.update(|c| c.finish(result));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || !input.get().trim().is_empty() && !chat.with(|c| c.pending);

    view! {
        <div class="chat">
            <div class="chat__messages" node_ref=messages_ref>
                {move || {
                    let turns = chat.with(|c| c.turns.clone());
                    if turns.is_empty() {
                        return view! {
                            <div class="panel-empty">"Ask about your day, your missions, or anything else."</div>
                        }
                            .into_any();
                    }
                    turns
                        .into_iter()
                        .map(|turn| {
                            let is_model = turn.role == ChatRole::Model;
                            view! {
                                <div class="chat__turn" class:chat__turn--model=is_model>
                                    {if is_model {
                                        let rendered = markdown::render_html(&turn.text);
                                        view! { <div class="markdown" inner_html=rendered></div> }.into_any()
                                    } else {
                                        view! { <span>{turn.text}</span> }.into_any()
                                    }}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
                {move || chat.with(|c| c.pending).then(|| view! { <div class="chat__pending">"Thinking..."</div> })}
                {move || chat.with(|c| c.error.clone()).map(|e| view! { <div class="chat__error">{e}</div> })}
            </div>

            <div class="chat__input-row">
                <textarea
                    class="input chat__input"
                    rows="2"
                    placeholder="Message the assistant..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <button class="btn btn--primary" on:click=move |_| do_send() disabled=move || !can_send()>
                    "Send"
                </button>
                <button
                    class="btn btn--ghost"
                    title="Clear conversation"
                    disabled=move || chat.with(|c| c.pending)
                    on:click=move |_| chat.update(ChatState::clear)
                >
                    "Clear"
                </button>
            </div>
        </div>
    }
}
