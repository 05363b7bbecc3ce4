//! Transient notices shown in the corner of the dashboard.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Show `text`. A toast identical to the newest one is not repeated: it
    /// takes a fresh id instead, so timers keyed on the old id no longer
    /// dismiss it.
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        let text = text.into();
        self.next_id += 1;
        if let Some(last) = self.toasts.last_mut() {
            if last.kind == kind && last.text == text {
                last.id = self.next_id;
                return last.id;
            }
        }
        self.toasts.push(Toast { id: self.next_id, kind, text });
        if self.toasts.len() > MAX_VISIBLE {
            let excess = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}
