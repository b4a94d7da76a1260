//! List Entries Use Case

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::application::config::KbConfig;
use crate::domain::cursor::Cursor;
use crate::domain::entry::KbEntry;
use crate::domain::repository::{EntryFilter, KbRepository};
use crate::error::{KbError, KbResult};

#[derive(Debug, Clone, Default)]
pub struct ListEntriesInput {
    pub limit: Option<i64>,
    pub after: Option<String>,
    pub query: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListEntriesOutput {
    pub items: Vec<KbEntry>,
    pub next_cursor: Option<Cursor>,
}

pub struct ListEntriesUseCase<R: KbRepository> {
    repo: Arc<R>,
    config: Arc<KbConfig>,
}

impl<R: KbRepository> ListEntriesUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<KbConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        viewer: &Viewer,
        input: ListEntriesInput,
    ) -> KbResult<ListEntriesOutput> {
        let limit = match input.limit {
            None => self.config.default_page_size,
            Some(n) if n >= 1 && n as usize <= self.config.max_page_size => n as usize,
            Some(_) => {
                return Err(KbError::Validation(format!(
                    "Parametr limit musi mieć wartość od 1 do {}",
                    self.config.max_page_size
                )));
            }
        };

        let after = match input.after.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(Cursor::decode(raw).ok_or_else(|| {
                KbError::Validation("Nieprawidłowy kursor stronicowania".to_string())
            })?),
            None => None,
        };

        let filter = EntryFilter {
            viewer: viewer.user_id(),
            after,
            query: non_empty(input.query),
            tag: non_empty(input.tag).map(|t| t.to_lowercase()),
            // One extra row tells us whether another page exists
            limit: limit + 1,
        };

        let mut items = self.repo.list(&filter).await?;

        let next_cursor = if items.len() > limit {
            items.truncate(limit);
            items
                .last()
                .map(|last| Cursor::new(last.updated_at_ms(), last.id))
        } else {
            None
        };

        Ok(ListEntriesOutput { items, next_cursor })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
