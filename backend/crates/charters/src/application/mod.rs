//! Application Layer
//!
//! Every use case acts on the caller's own charters only.

pub mod add_note;
pub mod delete_charter;
pub mod get_charter;
pub mod list_charters;
pub mod start_charter;
pub mod stop_charter;

pub use add_note::{AddNoteInput, AddNoteUseCase};
pub use delete_charter::DeleteCharterUseCase;
pub use get_charter::{CharterWithNotes, GetCharterUseCase};
pub use list_charters::ListChartersUseCase;
pub use start_charter::{StartCharterInput, StartCharterUseCase};
pub use stop_charter::StopCharterUseCase;

use kernel::id::CharterId;
use kernel::principal::{Principal, Viewer};

use crate::domain::charter::Charter;
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

pub(crate) fn require_principal(viewer: &Viewer) -> CharterResult<&Principal> {
    viewer.require().map_err(|_| CharterError::Unauthenticated)
}

/// Charter owned by `principal`; other users' charters look missing
pub(crate) async fn find_owned<R: CharterRepository>(
    repo: &R,
    principal: &Principal,
    id: &CharterId,
) -> CharterResult<Charter> {
    repo.find(id)
        .await?
        .filter(|charter| charter.user_id == principal.user_id)
        .ok_or(CharterError::NotFound)
}
