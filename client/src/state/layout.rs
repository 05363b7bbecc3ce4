//! Dashboard card placement and the in-progress drag or resize gesture.
//!
//! DESIGN
//! ======
//! A gesture remembers the card as it was when the pointer went down and
//! recomputes the card from that origin on every move. Rounding therefore
//! never accumulates, and cancelling restores the origin exactly.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use records::layout::{GRID_COLUMNS, default_layout, merge_with_defaults, pixels_to_cells};
use records::{CardLayout, PanelKind};

pub const STORAGE_KEY: &str = "deskboard.layout";

/// Grid row height in CSS pixels.
pub const ROW_PX: f64 = 56.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub kind: GestureKind,
    pub origin: CardLayout,
    pub start_x: f64,
    pub start_y: f64,
}

#[derive(Clone, Debug)]
pub struct LayoutState {
    pub cards: Vec<CardLayout>,
    pub gesture: Option<Gesture>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self { cards: default_layout(), gesture: None }
    }
}

impl LayoutState {
    pub fn from_stored(stored: Option<Vec<CardLayout>>) -> Self {
        Self { cards: merge_with_defaults(&stored.unwrap_or_default()), gesture: None }
    }

    pub fn card(&self, panel: PanelKind) -> Option<CardLayout> {
        self.cards.iter().copied().find(|c| c.panel == panel)
    }

    pub fn begin(&mut self, panel: PanelKind, kind: GestureKind, x: f64, y: f64) {
        if let Some(origin) = self.card(panel) {
            self.gesture = Some(Gesture { kind, origin, start_x: x, start_y: y });
        }
    }

    /// Apply the pointer position to the active gesture. `cell_px` is the
    /// current column width.
    pub fn track(&mut self, x: f64, y: f64, cell_px: f64) {
        let Some(gesture) = self.gesture else {
            return;
        };
        let dx = pixels_to_cells(x - gesture.start_x, cell_px);
        let dy = pixels_to_cells(y - gesture.start_y, ROW_PX);
        let next = match gesture.kind {
            GestureKind::Move => gesture.origin.moved(dx, dy, GRID_COLUMNS),
            GestureKind::Resize => gesture.origin.resized(dx, dy, GRID_COLUMNS),
        };
        if let Some(card) = self.cards.iter_mut().find(|c| c.panel == gesture.origin.panel) {
            *card = next;
        }
    }

    /// Finish the gesture. Returns `true` when the card actually changed and
    /// the layout should be persisted.
    pub fn end(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.card(gesture.origin.panel) != Some(gesture.origin)
    }

    pub fn cancel(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            if let Some(card) = self.cards.iter_mut().find(|c| c.panel == gesture.origin.panel) {
                *card = gesture.origin;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self, panel: PanelKind) -> bool {
        self.gesture.is_some_and(|g| g.origin.panel == panel)
    }
}
