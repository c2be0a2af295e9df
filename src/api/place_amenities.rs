use crate::resources::links::{self, Linked};
use crate::resources::{ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{extract::Path, http::StatusCode, routing::{get, post}, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route("/places/:place_id/amenities", get(list_place_amenities))
        .route(
            "/places/:place_id/amenities/:amenity_id",
            post(link_amenity).delete(unlink_amenity),
        )
}

async fn list_place_amenities(
    session: Session,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(links::list(&session, &place_id).await?))
}

async fn link_amenity(
    mut session: Session,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let (amenity, linked) = links::link(&mut session, &place_id, &amenity_id).await?;
    let status = match linked {
        Linked::Created => StatusCode::CREATED,
        Linked::Existing => StatusCode::OK,
    };
    Ok((status, Json(amenity)))
}

async fn unlink_amenity(
    mut session: Session,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Json<Wire>, ApiError> {
    links::unlink(&mut session, &place_id, &amenity_id).await?;
    Ok(Json(Wire::new()))
}
