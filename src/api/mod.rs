use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    Extension, Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use self::rest::router as rest_router;

pub mod graphql;
pub mod rest;

use crate::infrastructure::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let config = Arc::clone(&state.config);
    let schema = graphql::build_schema(Arc::clone(&state));

    let router = Router::new()
        .nest("/api", rest_router())
        .merge(graphql::router(schema, config.graphql.graphiql))
        .fallback(not_found)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http());

    match cors_layer(&config.app.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "not_found"})),
    )
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(%origin, error = %err, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
