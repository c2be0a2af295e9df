use crate::model::State;
use crate::resources::{self, ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{body::Bytes, extract::Path, http::StatusCode, routing::get, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route("/states", get(list_states).post(create_state))
        .route(
            "/states/:state_id",
            get(get_state).put(update_state).delete(delete_state),
        )
}

async fn list_states(session: Session) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(resources::list::<State>(&session).await?))
}

async fn get_state(session: Session, Path(state_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::show::<State>(&session, &state_id).await?))
}

async fn create_state(mut session: Session, body: Bytes) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let state = resources::create::<State>(&mut session, &body).await?;
    Ok((StatusCode::CREATED, Json(state)))
}

async fn update_state(
    mut session: Session,
    Path(state_id): Path<String>,
    body: Bytes,
) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::update::<State>(&mut session, &state_id, &body).await?))
}

async fn delete_state(mut session: Session, Path(state_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    resources::remove::<State>(&mut session, &state_id).await?;
    Ok(Json(Wire::new()))
}
