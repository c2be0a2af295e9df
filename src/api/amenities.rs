use crate::model::Amenity;
use crate::resources::{self, ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{body::Bytes, extract::Path, http::StatusCode, routing::get, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route("/amenities", get(list_amenities).post(create_amenity))
        .route(
            "/amenities/:amenity_id",
            get(get_amenity).put(update_amenity).delete(delete_amenity),
        )
}

async fn list_amenities(session: Session) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(resources::list::<Amenity>(&session).await?))
}

async fn get_amenity(session: Session, Path(amenity_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::show::<Amenity>(&session, &amenity_id).await?))
}

async fn create_amenity(mut session: Session, body: Bytes) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let amenity = resources::create::<Amenity>(&mut session, &body).await?;
    Ok((StatusCode::CREATED, Json(amenity)))
}

async fn update_amenity(
    mut session: Session,
    Path(amenity_id): Path<String>,
    body: Bytes,
) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::update::<Amenity>(&mut session, &amenity_id, &body).await?))
}

async fn delete_amenity(mut session: Session, Path(amenity_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    resources::remove::<Amenity>(&mut session, &amenity_id).await?;
    Ok(Json(Wire::new()))
}
