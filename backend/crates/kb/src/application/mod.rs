//! Application Layer
//!
//! Use cases for knowledge base entries.

pub mod config;
pub mod create_entry;
pub mod delete_entry;
pub mod get_entry;
pub mod list_entries;
pub mod update_entry;

pub use config::KbConfig;
pub use create_entry::{CreateEntryUseCase, EntryInput};
pub use delete_entry::DeleteEntryUseCase;
pub use get_entry::GetEntryUseCase;
pub use list_entries::{ListEntriesInput, ListEntriesOutput, ListEntriesUseCase};
pub use update_entry::UpdateEntryUseCase;

use kernel::principal::{Principal, Viewer};

use crate::error::{KbError, KbResult};

/// Writes need a signed-in caller
pub(crate) fn require_principal(viewer: &Viewer) -> KbResult<&Principal> {
    viewer.require().map_err(|_| KbError::Unauthenticated)
}
