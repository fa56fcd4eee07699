use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LayoutResult;

pub const MAX_SAVED_FILES: usize = 10;

/// A previously loaded calendar file kept for quick reopening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCalendarFile {
    pub name: String,
    pub content: String,
    pub added_at: DateTime<Utc>,
}

/// Key-value contract for persisting loaded calendar files.
pub trait SavedFileStore {
    /// Stores `content` under `name`, replacing any previous entry.
    fn save(&mut self, name: &str, content: &str);
    /// Entries, most recently saved first.
    fn list(&self) -> Vec<StoredCalendarFile>;
    /// Returns `true` when an entry was removed.
    fn remove(&mut self, name: &str) -> bool;
}

/// In-memory store, capped at [`MAX_SAVED_FILES`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedFiles {
    files: Vec<StoredCalendarFile>,
}

impl SavedFiles {
    /// Loads a store from its JSON form; unreadable input yields an empty store.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<StoredCalendarFile>>(json) {
            Ok(mut files) => {
                files.sort_by(|a, b| b.added_at.cmp(&a.added_at));
                Self { files }
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable saved files");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string(&self.files)?)
    }

    /// Saves with an explicit timestamp; re-saving a name moves it to the front.
    pub fn save_at(&mut self, name: &str, content: &str, added_at: DateTime<Utc>) {
        self.files.retain(|file| file.name != name);
        self.files.insert(
            0,
            StoredCalendarFile {
                name: name.to_owned(),
                content: content.to_owned(),
                added_at,
            },
        );
        self.files.truncate(MAX_SAVED_FILES);
        debug!(file = name, count = self.files.len(), "saved calendar file");
    }

    #[must_use]
    pub fn files(&self) -> &[StoredCalendarFile] {
        &self.files
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StoredCalendarFile> {
        self.files.iter().find(|file| file.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SavedFileStore for SavedFiles {
    fn save(&mut self, name: &str, content: &str) {
        self.save_at(name, content, Utc::now());
    }

    fn list(&self) -> Vec<StoredCalendarFile> {
        self.files.clone()
    }

    fn remove(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|file| file.name != name);
        before != self.files.len()
    }
}
