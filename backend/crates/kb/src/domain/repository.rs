//! Repository trait

use kernel::id::{KbEntryId, UserId};

use super::cursor::Cursor;
use super::entry::KbEntry;
use crate::error::KbResult;

/// Listing filter. Visibility: public entries plus `viewer`'s own.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub viewer: Option<UserId>,
    pub after: Option<Cursor>,
    /// Case-insensitive substring of title or URL
    pub query: Option<String>,
    pub tag: Option<String>,
    pub limit: usize,
}

#[trait_variant::make(KbRepository: Send)]
pub trait LocalKbRepository {
    /// At most `filter.limit` entries in `(updated_at DESC, id DESC)` order
    async fn list(&self, filter: &EntryFilter) -> KbResult<Vec<KbEntry>>;

    async fn find(&self, id: &KbEntryId) -> KbResult<Option<KbEntry>>;

    /// Fails with `KbError::DuplicateUrl` on a duplicate canonical URL
    async fn insert(&self, entry: &KbEntry) -> KbResult<()>;

    /// Fails with `KbError::DuplicateUrl` on a duplicate canonical URL
    async fn update(&self, entry: &KbEntry) -> KbResult<()>;

    async fn delete(&self, id: &KbEntryId) -> KbResult<bool>;
}
