use crate::model::User;
use crate::resources::{self, ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{body::Bytes, extract::Path, http::StatusCode, routing::get, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_users(session: Session) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(resources::list::<User>(&session).await?))
}

async fn get_user(session: Session, Path(user_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::show::<User>(&session, &user_id).await?))
}

async fn create_user(mut session: Session, body: Bytes) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let user = resources::create::<User>(&mut session, &body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    mut session: Session,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::update::<User>(&mut session, &user_id, &body).await?))
}

async fn delete_user(mut session: Session, Path(user_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    resources::remove::<User>(&mut session, &user_id).await?;
    Ok(Json(Wire::new()))
}
