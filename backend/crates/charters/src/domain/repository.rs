//! Repository trait

use chrono::{DateTime, Utc};
use kernel::id::{CharterId, UserId};

use super::charter::{Charter, CharterStatus};
use super::note::CharterNote;
use crate::error::CharterResult;

#[trait_variant::make(CharterRepository: Send)]
pub trait LocalCharterRepository {
    /// Newest first
    async fn list(&self, user_id: &UserId, status: Option<CharterStatus>)
        -> CharterResult<Vec<Charter>>;

    async fn find(&self, id: &CharterId) -> CharterResult<Option<Charter>>;

    /// Fails with `CharterError::ActiveExists` when the user already has an
    /// active charter
    async fn insert(&self, charter: &Charter) -> CharterResult<()>;

    /// Close an active charter. Returns `false` when it was not active.
    async fn close(&self, id: &CharterId, ended_at: DateTime<Utc>) -> CharterResult<bool>;

    /// Append a note to an active charter. Returns `false` when the charter
    /// is not active.
    async fn add_note(&self, note: &CharterNote) -> CharterResult<bool>;

    /// Oldest first
    async fn notes(&self, charter_id: &CharterId) -> CharterResult<Vec<CharterNote>>;

    async fn delete(&self, id: &CharterId) -> CharterResult<bool>;
}
