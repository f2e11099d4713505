use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::{get, put},
};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use super::{
    parse_bool, parse_optional,
    response::{ApiResponse, ApiResult},
};
use crate::{
    catalog::{Chapter, ChapterPatch, ChapterStatus},
    error::Error,
    query::{ChapterFilter, Facets},
    server::AppState,
};

/// Filter fields accepted by the chapter list, all optional.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ChapterQuery {
    /// physics, chemistry or mathematics
    pub subject: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub unit: Option<String>,
    /// "Not Started", "In Progress" or "Completed"
    pub status: Option<String>,
    /// true or false
    pub is_weak: Option<String>,
    /// case-insensitive part of the chapter name
    pub search: Option<String>,
}

impl TryFrom<ChapterQuery> for ChapterFilter {
    type Error = Error;
    fn try_from(query: ChapterQuery) -> Result<Self, Self::Error> {
        let text = |v: Option<String>| v.filter(|s| !s.is_empty());
        Ok(ChapterFilter {
            subject: parse_optional(query.subject)?,
            class_name: text(query.class_name),
            unit: text(query.unit),
            status: parse_optional(query.status)?,
            is_weak: parse_bool("isWeak", query.is_weak)?,
            search: text(query.search),
        })
    }
}

#[utoipa::path(
    context_path = "/api",
    path = "/chapters",
    method(get),
    params(ChapterQuery),
    responses(
        (status = 200, description = "Chapters matching every given filter", body = Vec<Chapter>),
        (status = 400, description = "Unrecognized subject, status or isWeak value")
    )
)]
pub async fn list_chapters(
    State(state): State<AppState>,
    query: Result<Query<ChapterQuery>, QueryRejection>,
) -> ApiResult<Vec<Chapter>> {
    let Query(query) = query?;
    let filter = ChapterFilter::try_from(query)?;
    let chapters = state.store.list_chapters(Some(&filter));
    Ok(ApiResponse::ok(chapters, "Chapters retrieved successfully"))
}

#[utoipa::path(
    context_path = "/api",
    path = "/chapters/{id}",
    method(get),
    params(("id" = String, Path, description = "Chapter id")),
    responses(
        (status = 200, description = "The chapter", body = Chapter),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn get_chapter(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Chapter> {
    let Path(id) = path?;
    let chapter = state
        .store
        .get_chapter_by_id(&id)
        .ok_or_else(|| Error::not_found("Chapter not found"))?;
    Ok(ApiResponse::ok(chapter, "Chapter retrieved successfully"))
}

#[utoipa::path(
    context_path = "/api",
    path = "/chapters/{id}",
    method(put),
    params(("id" = String, Path, description = "Chapter id")),
    request_body = ChapterPatch,
    responses(
        (status = 200, description = "The updated chapter", body = Chapter),
        (status = 400, description = "Malformed body or progress out of range"),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn update_chapter(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<ChapterPatch>, JsonRejection>,
) -> ApiResult<Chapter> {
    let Path(id) = path?;
    let Json(patch) = body?;
    let chapter = state.store.update_chapter_progress(&id, patch)?;
    Ok(ApiResponse::ok(chapter, "Chapter updated successfully"))
}

/// Progress update payload. `status` is inferred from `progress` when absent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressRequest {
    /// required, 0..=100
    pub progress: Option<i64>,
    pub status: Option<ChapterStatus>,
    pub accuracy: Option<f64>,
    pub speed: Option<f64>,
    pub score: Option<f64>,
}

impl TryFrom<ProgressRequest> for ChapterPatch {
    type Error = Error;
    fn try_from(req: ProgressRequest) -> Result<Self, Self::Error> {
        let Some(progress) = req.progress else {
            return Err(Error::validation("Missing required field: progress"));
        };
        let patch = ChapterPatch {
            status: req.status,
            progress: Some(progress),
            accuracy: req.accuracy,
            speed: req.speed,
            score: req.score,
            ..Default::default()
        };
        patch.checked_progress()?;
        Ok(patch)
    }
}

#[utoipa::path(
    context_path = "/api",
    path = "/chapters/{id}/progress",
    method(put),
    params(("id" = String, Path, description = "Chapter id")),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "The updated chapter", body = Chapter),
        (status = 400, description = "Missing progress or progress out of range"),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn update_progress(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<ProgressRequest>, JsonRejection>,
) -> ApiResult<Chapter> {
    let Path(id) = path?;
    let Json(req) = body?;
    let patch = ChapterPatch::try_from(req)?;
    let chapter = state.store.update_chapter_progress(&id, patch)?;
    info!("progress of {} set to {}", chapter.id, chapter.progress);
    Ok(ApiResponse::ok(chapter, "Chapter progress updated successfully"))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacetsQuery {
    /// physics, chemistry or mathematics
    pub subject: Option<String>,
}

#[utoipa::path(
    context_path = "/api",
    path = "/chapters/facets",
    method(get),
    params(FacetsQuery),
    responses(
        (status = 200, description = "Sorted class and unit choices of a subject", body = Facets),
        (status = 400, description = "Missing or invalid subject")
    )
)]
pub async fn get_facets(
    State(state): State<AppState>,
    query: Result<Query<FacetsQuery>, QueryRejection>,
) -> ApiResult<Facets> {
    let Query(query) = query?;
    let Some(subject) = parse_optional(query.subject)? else {
        return Err(Error::validation("Missing required field: subject"));
    };
    let facets = Facets::collect(&state.store.list_chapters(None), subject);
    Ok(ApiResponse::ok(facets, "Facets retrieved successfully"))
}

pub fn get_chapter_scope() -> Router<AppState> {
    Router::new()
        .route("/chapters", get(list_chapters))
        .route("/chapters/facets", get(get_facets))
        .route("/chapters/{id}", get(get_chapter).put(update_chapter))
        .route("/chapters/{id}/progress", put(update_progress))
}
