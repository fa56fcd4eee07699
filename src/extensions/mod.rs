//! Collaborators around the layout core: input normalization and the
//! saved-file store.
//!
//! Nothing in `core` depends on these modules.

pub mod import;
pub mod saved_files;

pub use import::{DEFAULT_SUMMARY, EventRecord, events_from_json, normalize_records};
pub use saved_files::{MAX_SAVED_FILES, SavedFileStore, SavedFiles, StoredCalendarFile};
