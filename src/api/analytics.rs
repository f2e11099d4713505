use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{
    parse_optional,
    response::{ApiResponse, ApiResult},
};
use crate::{
    analytics::{Analytics, StatsReport, Timeframe},
    catalog::Subject,
    server::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// narrows the headline numbers to one subject
    pub subject: Option<String>,
}

#[utoipa::path(
    context_path = "/api",
    path = "/analytics/dashboard",
    method(get),
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard analytics", body = Analytics),
        (status = 400, description = "Invalid subject")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> ApiResult<Analytics> {
    let Query(query) = query?;
    let subject = parse_optional(query.subject)?;
    Ok(ApiResponse::ok(
        state.store.get_analytics(subject),
        "Analytics retrieved successfully",
    ))
}

#[utoipa::path(
    context_path = "/api",
    path = "/analytics/subject/{subject}",
    method(get),
    params(("subject" = String, Path, description = "physics, chemistry or mathematics")),
    responses(
        (status = 200, description = "Analytics of one subject", body = Analytics),
        (status = 400, description = "Invalid subject")
    )
)]
pub async fn subject_analytics(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Analytics> {
    let Path(subject) = path?;
    let subject: Subject = subject.parse()?;
    Ok(ApiResponse::ok(
        state.store.get_analytics(Some(subject)),
        format!("{subject} analytics retrieved successfully"),
    ))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// 7d, 30d, 90d or 1y
    pub timeframe: Option<String>,
}

#[utoipa::path(
    context_path = "/api",
    path = "/stats",
    method(get),
    params(StatsQuery),
    responses(
        (status = 200, description = "Overview, performance, per-subject numbers and trends", body = StatsReport),
        (status = 400, description = "Invalid timeframe")
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> ApiResult<StatsReport> {
    let Query(query) = query?;
    let timeframe: Timeframe =
        parse_optional(query.timeframe)?.unwrap_or(state.default_timeframe);
    let report = StatsReport::compute(&state.store.list_chapters(None), timeframe);
    Ok(ApiResponse::ok(report, "Statistics retrieved successfully"))
}

pub fn get_analytics_scope() -> Router<AppState> {
    Router::new()
        .nest(
            "/analytics",
            Router::new()
                .route("/dashboard", get(dashboard))
                .route("/subject/{subject}", get(subject_analytics)),
        )
        .route("/stats", get(stats))
}
