use crate::resources::{self, ApiError};
use crate::storage::{Session, Storage};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub fn router() -> Router<Storage> {
    Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats))
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

async fn stats(session: Session) -> Result<Json<BTreeMap<&'static str, usize>>, ApiError> {
    Ok(Json(resources::stats(&session).await?))
}
