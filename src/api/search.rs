use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{
    parse_optional,
    response::{ApiResponse, ApiResult},
};
use crate::{
    query::{SearchHit, search},
    server::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// free text matched against chapter names
    pub q: Option<String>,
    /// restricts the search to one subject
    pub subject: Option<String>,
}

#[utoipa::path(
    context_path = "/api",
    path = "/search",
    method(get),
    params(SearchQuery),
    responses(
        (status = 200, description = "Chapters ranked by relevance, best first", body = Vec<SearchHit>),
        (status = 400, description = "Invalid subject")
    )
)]
pub async fn search_chapters(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<SearchHit>> {
    let Query(query) = query?;
    let subject = parse_optional(query.subject)?;
    let text = query.q.unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(ApiResponse::ok(vec![], "Empty search query"));
    }
    let hits = search(&state.store.list_chapters(None), &text, subject);
    let message = format!("Found {} results", hits.len());
    Ok(ApiResponse::ok(hits, message))
}

pub fn get_search_scope() -> Router<AppState> {
    Router::new().route("/search", get(search_chapters))
}
