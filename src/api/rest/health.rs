use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};

use crate::infrastructure::state::AppState;

pub async fn healthcheck(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let users = state.store.list_users().await.map_err(unavailable)?.len();
    let posts = state.store.list_posts().await.map_err(unavailable)?.len();

    Ok(Json(serde_json::json!({
        "status": "ok",
        "users": users,
        "posts": posts,
    })))
}

fn unavailable(err: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "status": "unavailable", "error": err.to_string() })),
    )
}
