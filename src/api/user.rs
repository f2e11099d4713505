use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, put},
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::response::{ApiResponse, ApiResult};
use crate::{
    catalog::{Preferences, PreferencesPatch, User},
    error::Error,
    server::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    /// defaults to the demo user
    pub user_id: Option<String>,
    /// looks the user up by email instead of id
    pub email: Option<String>,
}

impl UserQuery {
    fn user_id<'a>(&'a self, state: &'a AppState) -> &'a str {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&state.default_user_id)
    }
}

#[utoipa::path(
    context_path = "/api",
    path = "/user/profile",
    method(get),
    params(UserQuery),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<User> {
    let Query(query) = query?;
    let user = match query.email.as_deref().filter(|e| !e.is_empty()) {
        Some(email) => state.store.get_user_by_email(email),
        None => state.store.get_user_by_id(query.user_id(&state)),
    }
    .ok_or_else(|| Error::not_found("User not found"))?;
    Ok(ApiResponse::ok(user, "User profile retrieved successfully"))
}

#[utoipa::path(
    context_path = "/api",
    path = "/user/preferences",
    method(put),
    params(UserQuery),
    request_body = PreferencesPatch,
    responses(
        (status = 200, description = "Merged preferences", body = Preferences),
        (status = 400, description = "Unknown theme or subject"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
    body: Result<Json<PreferencesPatch>, JsonRejection>,
) -> ApiResult<Preferences> {
    let Query(query) = query?;
    let Json(patch) = body?;
    let user = state
        .store
        .update_user_preferences(query.user_id(&state), patch)
        .ok_or_else(|| Error::not_found("User not found"))?;
    Ok(ApiResponse::ok(
        user.preferences,
        "User preferences updated successfully",
    ))
}

pub fn get_user_scope() -> Router<AppState> {
    Router::new().nest(
        "/user",
        Router::new()
            .route("/profile", get(profile))
            .route("/preferences", put(update_preferences)),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::api::testing::{call, router};

    #[tokio::test]
    async fn test_profile() {
        let router = router();
        let (status, body) = call(&router, Method::GET, "/api/user/profile", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "user-1");
        assert_eq!(body["data"]["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(body["data"]["preferences"]["theme"], "system");

        let (status, body) = call(
            &router,
            Method::GET,
            "/api/user/profile?email=student@mathongo.com",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "John Doe");

        let (status, body) =
            call(&router, Method::GET, "/api/user/profile?userId=user-9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_update_preferences() {
        let router = router();
        let (status, body) = call(
            &router,
            Method::PUT,
            "/api/user/preferences",
            Some(json!({"theme": "dark", "defaultSubject": "mathematics"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({"theme": "dark", "notifications": true, "defaultSubject": "mathematics"})
        );

        let (_, body) = call(&router, Method::GET, "/api/user/profile", None).await;
        assert_eq!(body["data"]["preferences"]["theme"], "dark");

        let (status, _) = call(
            &router,
            Method::PUT,
            "/api/user/preferences",
            Some(json!({"theme": "neon"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &router,
            Method::PUT,
            "/api/user/preferences?userId=user-9",
            Some(json!({"notifications": false})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
