//! Dashboard card placement on a fixed-column grid.
//!
//! Cards are positioned in whole grid cells. Drag and resize gestures arrive
//! as pixel deltas and are converted with [`pixels_to_cells`] before being
//! applied, so a stored layout never holds fractional positions.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

pub const GRID_COLUMNS: u32 = 12;
pub const MIN_CARD_CELLS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Missions,
    Agenda,
    Notes,
    Vault,
    Chat,
    Profile,
}

impl PanelKind {
    pub const ALL: [Self; 6] = [Self::Missions, Self::Agenda, Self::Notes, Self::Vault, Self::Chat, Self::Profile];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Missions => "Missions",
            Self::Agenda => "Agenda",
            Self::Notes => "Notes",
            Self::Vault => "Vault",
            Self::Chat => "Assistant",
            Self::Profile => "Profile",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLayout {
    pub panel: PanelKind,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

fn offset(value: u32, delta: i32) -> u32 {
    value.saturating_add_signed(delta)
}

impl CardLayout {
    /// Move by whole cells, keeping the card inside the grid columns.
    #[must_use]
    pub fn moved(self, dx: i32, dy: i32, columns: u32) -> Self {
        let max_x = columns.saturating_sub(self.w);
        Self { x: offset(self.x, dx).min(max_x), y: offset(self.y, dy), ..self }
    }

    /// Resize by whole cells from the bottom-right corner. Size never drops
    /// below [`MIN_CARD_CELLS`] and width never passes the right edge.
    #[must_use]
    pub fn resized(self, dw: i32, dh: i32, columns: u32) -> Self {
        let max_w = columns.saturating_sub(self.x).max(MIN_CARD_CELLS);
        Self {
            w: offset(self.w, dw).clamp(MIN_CARD_CELLS, max_w),
            h: offset(self.h, dh).max(MIN_CARD_CELLS),
            ..self
        }
    }
}

/// Round a pixel delta to whole cells.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn pixels_to_cells(px: f64, cell_px: f64) -> i32 {
    if cell_px <= 0.0 || !px.is_finite() {
        return 0;
    }
    (px / cell_px).round() as i32
}

/// Initial placement for a new user.
#[must_use]
pub fn default_layout() -> Vec<CardLayout> {
    let card = |panel, x, y, w, h| CardLayout { panel, x, y, w, h };
    vec![
        card(PanelKind::Missions, 0, 0, 4, 6),
        card(PanelKind::Agenda, 4, 0, 5, 6),
        card(PanelKind::Profile, 9, 0, 3, 4),
        card(PanelKind::Notes, 0, 6, 5, 5),
        card(PanelKind::Vault, 5, 6, 4, 5),
        card(PanelKind::Chat, 9, 4, 3, 7),
    ]
}

/// Reconcile a stored layout with the current panel set: keep the first
/// stored entry per panel, append defaults for panels it lacks.
#[must_use]
pub fn merge_with_defaults(stored: &[CardLayout]) -> Vec<CardLayout> {
    let mut out: Vec<CardLayout> = Vec::with_capacity(PanelKind::ALL.len());
    for card in stored {
        if !out.iter().any(|c| c.panel == card.panel) {
            let w = card.w.clamp(MIN_CARD_CELLS, GRID_COLUMNS);
            out.push(CardLayout { w, ..*card }.moved(0, 0, GRID_COLUMNS).resized(0, 0, GRID_COLUMNS));
        }
    }
    for card in default_layout() {
        if !out.iter().any(|c| c.panel == card.panel) {
            out.push(card);
        }
    }
    out
}
