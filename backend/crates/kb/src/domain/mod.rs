//! Domain Layer

pub mod canonical_url;
pub mod cursor;
pub mod entry;
pub mod repository;

pub use canonical_url::EntryUrl;
pub use cursor::Cursor;
pub use entry::{EntryDraft, KbEntry};
pub use repository::{EntryFilter, KbRepository};
