//! HTTP Handlers for defect templates

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use kernel::id::DefectTemplateId;
use kernel::principal::Viewer;

use crate::application::{
    CreateTemplateUseCase, DeleteTemplateUseCase, GetTemplateUseCase, ListTemplatesUseCase,
    RenderTemplateUseCase, require_principal,
};
use crate::domain::repository::TemplateRepository;
use crate::error::TemplateResult;
use crate::presentation::dto::{
    CreateTemplateRequest, ListTemplatesResponse, RenderRequest, RenderResponse,
    TemplateResponse,
};

pub struct TemplateAppState<R: TemplateRepository> {
    pub repo: Arc<R>,
}

impl<R: TemplateRepository> Clone for TemplateAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// GET /
pub async fn list_templates<R>(
    State(state): State<TemplateAppState<R>>,
    viewer: Viewer,
) -> TemplateResult<Json<ListTemplatesResponse>>
where
    R: TemplateRepository + Send + Sync + 'static,
{
    let templates = ListTemplatesUseCase::new(state.repo.clone())
        .execute(&viewer)
        .await?;

    Ok(Json(ListTemplatesResponse {
        items: templates.iter().map(TemplateResponse::from).collect(),
    }))
}

/// GET /{id}
pub async fn get_template<R>(
    State(state): State<TemplateAppState<R>>,
    viewer: Viewer,
    id: Result<Path<DefectTemplateId>, PathRejection>,
) -> TemplateResult<Json<TemplateResponse>>
where
    R: TemplateRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let template = GetTemplateUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(Json(TemplateResponse::from(&template)))
}

/// POST /
pub async fn create_template<R>(
    State(state): State<TemplateAppState<R>>,
    viewer: Viewer,
    body: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> TemplateResult<impl IntoResponse>
where
    R: TemplateRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Json(body) = body?;

    let template = CreateTemplateUseCase::new(state.repo.clone())
        .execute(&viewer, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(TemplateResponse::from(&template))))
}

/// DELETE /{id}
pub async fn delete_template<R>(
    State(state): State<TemplateAppState<R>>,
    viewer: Viewer,
    id: Result<Path<DefectTemplateId>, PathRejection>,
) -> TemplateResult<StatusCode>
where
    R: TemplateRepository + Send + Sync + 'static,
{
    require_principal(&viewer)?;
    let Path(id) = id?;
    DeleteTemplateUseCase::new(state.repo.clone())
        .execute(&viewer, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /{id}/render
pub async fn render_template<R>(
    State(state): State<TemplateAppState<R>>,
    viewer: Viewer,
    id: Result<Path<DefectTemplateId>, PathRejection>,
    body: Result<Json<RenderRequest>, JsonRejection>,
) -> TemplateResult<Json<RenderResponse>>
where
    R: TemplateRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(body) = body?;

    let markdown = RenderTemplateUseCase::new(state.repo.clone())
        .execute(&viewer, &id, &body.string_values())
        .await?;

    Ok(Json(RenderResponse { markdown }))
}
