//! Dashboard card frame: header drag handle, body, and corner resize handle.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use leptos::prelude::*;
use records::{CardLayout, PanelKind};

use crate::state::layout::{GestureKind, LayoutState};

/// CSS grid placement for a card. Grid lines are 1-based.
pub fn card_style(card: &CardLayout) -> String {
    format!(
        "grid-column: {} / span {}; grid-row: {} / span {};",
        card.x + 1,
        card.w,
        card.y + 1,
        card.h
    )
}

#[component]
pub fn Card(panel: PanelKind, children: Children) -> impl IntoView {
    let layout = expect_context::<RwSignal<LayoutState>>();

    let start = move |kind: GestureKind, ev: leptos::ev::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        layout.update(|l| l.begin(panel, kind, x, y));
    };

    let style = move || layout.with(|l| l.card(panel).map(|c| card_style(&c)).unwrap_or_default());
    let dragging = move || layout.with(|l| l.is_dragging(panel));

    view! {
        <section class="card" class:card--dragging=dragging style=style>
            <header class="card__header" on:pointerdown=move |ev| start(GestureKind::Move, ev)>
                <h2 class="card__title">{panel.title()}</h2>
            </header>
            <div class="card__body">{children()}</div>
            <div
                class="card__resize"
                title="Drag to resize"
                on:pointerdown=move |ev| start(GestureKind::Resize, ev)
            ></div>
        </section>
    }
}
