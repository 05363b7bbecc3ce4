//! Dashboard chrome state: theme and browser notification access.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Browser answer to `Notification.permission`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotifyPermission {
    /// The API is missing (SSR, or an old browser).
    #[default]
    Unsupported,
    /// Not asked yet.
    Prompt,
    Granted,
    Denied,
}

impl NotifyPermission {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            "default" => Self::Prompt,
            _ => Self::Unsupported,
        }
    }

    pub fn can_ask(self) -> bool {
        self == Self::Prompt
    }
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
    pub notifications: NotifyPermission,
}
