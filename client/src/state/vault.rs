//! Vault panel state: stored links plus the active filter.

#[cfg(test)]
#[path = "vault_test.rs"]
mod vault_test;

use chrono::{DateTime, Utc};
use records::vault::{categories, filter_links};
use records::{RecordError, VaultLink};

pub const STORAGE_KEY: &str = "deskboard.vault";

#[derive(Clone, Debug, Default)]
pub struct VaultState {
    pub links: Vec<VaultLink>,
    pub category: Option<String>,
    pub query: String,
}

impl VaultState {
    pub fn from_stored(stored: Option<Vec<VaultLink>>) -> Self {
        Self { links: stored.unwrap_or_default(), ..Self::default() }
    }

    /// Add a link at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns the URL validation error from [`VaultLink::new`].
    pub fn add(&mut self, title: &str, url: &str, category: &str, now: DateTime<Utc>) -> Result<(), RecordError> {
        let link = VaultLink::new(title, url, category, now)?;
        self.links.insert(0, link);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) {
        self.links.retain(|l| l.id != id);
        if let Some(active) = self.category.as_deref() {
            if !self.links.iter().any(|l| l.category.eq_ignore_ascii_case(active)) {
                self.category = None;
            }
        }
    }

    pub fn visible(&self) -> Vec<VaultLink> {
        filter_links(&self.links, self.category.as_deref(), &self.query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.links)
    }
}
