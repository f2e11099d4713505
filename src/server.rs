use std::{any::Any, sync::Arc};

use axum::{
    Router,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    analytics::Timeframe,
    api::{
        ApiDoc, analytics::get_analytics_scope, chapters::get_chapter_scope,
        response::ApiResponse, search::get_search_scope, user::get_user_scope,
    },
    catalog::{ChapterStore, seed::DEMO_USER_ID},
    config::Config,
    error::Error,
};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ChapterStore>,
    pub default_user_id: String,
    pub default_timeframe: Timeframe,
}

impl AppState {
    pub fn new(store: Arc<ChapterStore>) -> Self {
        Self {
            store,
            default_user_id: DEMO_USER_ID.to_string(),
            default_timeframe: Timeframe::SevenDays,
        }
    }

    pub fn with_config(store: Arc<ChapterStore>, config: &Config) -> Self {
        Self {
            store,
            default_user_id: config.default_user_id.clone(),
            default_timeframe: config.default_timeframe,
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    Error::Fatal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

async fn not_found() -> Error {
    Error::not_found("Not found")
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        ApiResponse::<()>::error("Method not allowed"),
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    let api = Router::new()
        .merge(get_chapter_scope())
        .merge(get_search_scope())
        .merge(get_analytics_scope())
        .merge(get_user_scope());
    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::api::testing::{call, router, small_store};

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = call(&router(), Method::GET, "/api/nothing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_wrong_method_gets_envelope() {
        let (status, body) = call(&router(), Method::DELETE, "/api/chapters/p1", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/chapters/p1/progress")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chapters")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_500() {
        async fn explode() -> &'static str {
            panic!("secret detail")
        }
        let router: Router = Router::new()
            .route("/boom", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));
        let (status, body) = call(&router, Method::GET, "/boom", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_config_defaults_reach_handlers() {
        let config = Config {
            default_timeframe: Timeframe::NinetyDays,
            ..Default::default()
        };
        let state = AppState::with_config(Arc::new(small_store()), &config);
        let (_, body) = call(&build_router(state), Method::GET, "/api/stats", None).await;
        assert_eq!(body["data"]["timeframe"], "90d");
    }
}
