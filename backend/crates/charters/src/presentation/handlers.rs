//! HTTP Handlers for exploration charters

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
use kernel::id::CharterId;
use kernel::principal::Viewer;

use crate::application::{
    AddNoteInput, AddNoteUseCase, DeleteCharterUseCase, GetCharterUseCase, ListChartersUseCase,
    StartCharterInput, StartCharterUseCase, StopCharterUseCase, require_principal,
};
use crate::domain::repository::CharterRepository;
use crate::error::CharterResult;
use crate::presentation::dto::{
    AddNoteRequest, CharterDetailResponse, CharterResponse, ListChartersQuery,
    ListChartersResponse, NoteResponse, StartCharterRequest,
};

pub struct CharterAppState<R: CharterRepository> {
    pub repo: Arc<R>,
}

impl<R: CharterRepository> Clone for CharterAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// POST /
pub async fn start_charter<R>(
    State(state): State<CharterAppState<R>>,
    viewer: Viewer,
    body: Result<Json<StartCharterRequest>, JsonRejection>,
) -> CharterResult<impl IntoResponse>
where
    R: CharterRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Json(body) = body?;

    let charter = StartCharterUseCase::new(state.repo.clone())
        .execute(
            &viewer,
            StartCharterInput {
                goal: body.goal,
                hypotheses: body.hypotheses,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CharterResponse::from(&charter))))
}

/// GET /
pub async fn list_charters<R>(
    State(state): State<CharterAppState<R>>,
    viewer: Viewer,
    query: Result<Query<ListChartersQuery>, QueryRejection>,
) -> CharterResult<Json<ListChartersResponse>>
where
    R: CharterRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let charters = ListChartersUseCase::new(state.repo.clone())
        .execute(&viewer, query.status.as_deref())
        .await?;

    Ok(Json(ListChartersResponse {
        items: charters.iter().map(CharterResponse::from).collect(),
    }))
}

/// GET /{id}
pub async fn get_charter<R>(
    State(state): State<CharterAppState<R>>,
    viewer: Viewer,
    id: Result<Path<CharterId>, PathRejection>,
) -> CharterResult<Json<CharterDetailResponse>>
where
    R: CharterRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Path(id) = id?;
    let detail = GetCharterUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(Json(CharterDetailResponse::from(&detail)))
}

/// POST /{id}/stop
pub async fn stop_charter<R>(
    State(state): State<CharterAppState<R>>,
    viewer: Viewer,
    id: Result<Path<CharterId>, PathRejection>,
) -> CharterResult<Json<CharterResponse>>
where
    R: CharterRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Path(id) = id?;
    let charter = StopCharterUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(Json(CharterResponse::from(&charter)))
}

/// POST /{id}/notes
pub async fn add_note<R>(
    State(state): State<CharterAppState<R>>,
    viewer: Viewer,
    id: Result<Path<CharterId>, PathRejection>,
    body: Result<Json<AddNoteRequest>, JsonRejection>,
) -> CharterResult<impl IntoResponse>
where
    R: CharterRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Path(id) = id?;
    let Json(body) = body?;

    let note = AddNoteUseCase::new(state.repo.clone())
        .execute(
            &viewer,
            &id,
            AddNoteInput {
                label: body.label,
                body: body.body,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse::from(&note))))
}

/// DELETE /{id}
pub async fn delete_charter<R>(
    State(state): State<CharterAppState<R>>,
    viewer: Viewer,
    id: Result<Path<CharterId>, PathRejection>,
) -> CharterResult<StatusCode>
where
    R: CharterRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Path(id) = id?;
    DeleteCharterUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
