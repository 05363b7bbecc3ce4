//! Account profile row and avatar upload rules.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

pub const MAX_DISPLAY_NAME_CHARS: usize = 64;
pub const MAX_BIO_CHARS: usize = 280;
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Label for an account known only by its email: the local part, else
/// `"Anonymous"`.
#[must_use]
pub fn email_label(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .filter(|local| !local.is_empty())
        .map_or_else(|| "Anonymous".to_owned(), str::to_owned)
}

impl Profile {
    /// Name shown on the profile card: display name, else [`email_label`].
    #[must_use]
    pub fn display_label(&self) -> String {
        match self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => name.to_owned(),
            None => email_label(self.email.as_deref()),
        }
    }

    /// One- or two-letter fallback shown when there is no avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_label()
            .split(|c: char| c.is_whitespace() || c == '.' || c == '_')
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Editable profile fields. `None` leaves a field as it is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Trim both fields; blank values become `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when a field exceeds its length limit.
    pub fn validate(self) -> Result<Self, RecordError> {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        let display_name = clean(self.display_name);
        let bio = clean(self.bio);
        if display_name
            .as_ref()
            .is_some_and(|n| n.chars().count() > MAX_DISPLAY_NAME_CHARS)
        {
            return Err(RecordError::DisplayNameTooLong { max: MAX_DISPLAY_NAME_CHARS });
        }
        if bio.as_ref().is_some_and(|b| b.chars().count() > MAX_BIO_CHARS) {
            return Err(RecordError::BioTooLong { max: MAX_BIO_CHARS });
        }
        Ok(Self { display_name, bio })
    }
}

/// Validated avatar image metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvatarUpload {
    pub content_type: &'static str,
    pub extension: &'static str,
}

impl AvatarUpload {
    /// Check an upload's declared content type and size.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnsupportedAvatarType`] or
    /// [`RecordError::AvatarTooLarge`].
    pub fn validate(content_type: &str, len: usize) -> Result<Self, RecordError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let (content_type, extension) = match essence.as_str() {
            "image/png" => ("image/png", "png"),
            "image/jpeg" | "image/jpg" => ("image/jpeg", "jpg"),
            "image/gif" => ("image/gif", "gif"),
            "image/webp" => ("image/webp", "webp"),
            _ => return Err(RecordError::UnsupportedAvatarType(essence)),
        };
        if len > MAX_AVATAR_BYTES {
            return Err(RecordError::AvatarTooLarge { max_bytes: MAX_AVATAR_BYTES });
        }
        Ok(Self { content_type, extension })
    }

    /// Storage object path for a user's avatar. One object per user, overwritten on upload.
    #[must_use]
    pub fn object_path(&self, user_id: &str) -> String {
        format!("{user_id}/avatar.{}", self.extension)
    }
}
