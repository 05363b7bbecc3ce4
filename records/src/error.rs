//! Validation errors shared by every record type.
//!
//! Display strings are user-facing: panels show them verbatim in toasts and
//! the server returns them in `{ "error": ... }` bodies.

/// A record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("title is required")]
    EmptyTitle,

    #[error("title is too long (max {max} characters)")]
    TitleTooLong { max: usize },

    #[error("URL is required")]
    EmptyUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("event cannot end before it starts")]
    EndsBeforeStart,

    #[error("note is empty")]
    EmptyNote,

    #[error("display name is too long (max {max} characters)")]
    DisplayNameTooLong { max: usize },

    #[error("bio is too long (max {max} characters)")]
    BioTooLong { max: usize },

    #[error("unsupported image type: {0}")]
    UnsupportedAvatarType(String),

    #[error("image is too large (max {max_bytes} bytes)")]
    AvatarTooLarge { max_bytes: usize },

    #[error("message is empty")]
    EmptyPrompt,
}
