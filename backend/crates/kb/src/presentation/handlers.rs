//! HTTP Handlers for the knowledge base

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use kernel::id::KbEntryId;
use kernel::principal::Viewer;
use serde_json::Value;

use crate::application::{
    CreateEntryUseCase, DeleteEntryUseCase, GetEntryUseCase, ListEntriesInput,
    ListEntriesUseCase, UpdateEntryUseCase,
};
use crate::application::config::KbConfig;
use crate::domain::repository::KbRepository;
use crate::error::KbResult;
use crate::presentation::dto::{
    EntryRequest, EntryResponse, ListEntriesQuery, ListEntriesResponse,
};

pub struct KbAppState<R: KbRepository> {
    pub repo: Arc<R>,
    pub config: Arc<KbConfig>,
}

impl<R: KbRepository> KbAppState<R> {
    pub fn new(repo: R, config: KbConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

impl<R: KbRepository> Clone for KbAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /entries
pub async fn list_entries<R>(
    State(state): State<KbAppState<R>>,
    viewer: Viewer,
    query: Result<Query<ListEntriesQuery>, QueryRejection>,
) -> KbResult<Json<ListEntriesResponse>>
where
    R: KbRepository + Send + Sync + 'static,
{
    let Query(query) = query?;

    let output = ListEntriesUseCase::new(state.repo.clone(), state.config.clone())
        .execute(
            &viewer,
            ListEntriesInput {
                limit: query.limit,
                after: query.after,
                query: query.q,
                tag: query.tag,
            },
        )
        .await?;

    Ok(Json(ListEntriesResponse {
        items: output.items.iter().map(EntryResponse::from).collect(),
        next_cursor: output.next_cursor.map(|c| c.encode()),
    }))
}

/// GET /entries/{id}
pub async fn get_entry<R>(
    State(state): State<KbAppState<R>>,
    viewer: Viewer,
    id: Result<Path<KbEntryId>, PathRejection>,
) -> KbResult<Json<EntryResponse>>
where
    R: KbRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let entry = GetEntryUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(Json(EntryResponse::from(&entry)))
}

/// POST /entries
pub async fn create_entry<R>(
    State(state): State<KbAppState<R>>,
    viewer: Viewer,
    body: Result<Json<Value>, JsonRejection>,
) -> KbResult<impl IntoResponse>
where
    R: KbRepository + Send + Sync + 'static,
{
    // Authentication first: anonymous callers get 401 whatever they send
    crate::application::require_principal(&viewer)?;

    let Json(body) = body?;
    let request = EntryRequest::from_value(body)?;

    let entry = CreateEntryUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&viewer, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(EntryResponse::from(&entry))))
}

/// PUT /entries/{id}
pub async fn update_entry<R>(
    State(state): State<KbAppState<R>>,
    viewer: Viewer,
    id: Result<Path<KbEntryId>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> KbResult<Json<EntryResponse>>
where
    R: KbRepository + Send + Sync + 'static,
{
    crate::application::require_principal(&viewer)?;

    let Path(id) = id?;
    let Json(body) = body?;
    let request = EntryRequest::from_value(body)?;

    let entry = UpdateEntryUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&viewer, &id, request.into())
        .await?;

    Ok(Json(EntryResponse::from(&entry)))
}

/// DELETE /entries/{id}
pub async fn delete_entry<R>(
    State(state): State<KbAppState<R>>,
    viewer: Viewer,
    id: Result<Path<KbEntryId>, PathRejection>,
) -> KbResult<StatusCode>
where
    R: KbRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    DeleteEntryUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
