use crate::model::Place;
use crate::resources::{self, ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{body::Bytes, extract::Path, http::StatusCode, routing::get, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route(
            "/cities/:city_id/places",
            get(list_places).post(create_place),
        )
        .route(
            "/places/:place_id",
            get(get_place).put(update_place).delete(delete_place),
        )
}

async fn list_places(session: Session, Path(city_id): Path<String>) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(resources::list_children::<Place>(&session, &city_id).await?))
}

async fn get_place(session: Session, Path(place_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::show::<Place>(&session, &place_id).await?))
}

async fn create_place(
    mut session: Session,
    Path(city_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let place = resources::create_child::<Place>(&mut session, &city_id, &body).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

async fn update_place(
    mut session: Session,
    Path(place_id): Path<String>,
    body: Bytes,
) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::update::<Place>(&mut session, &place_id, &body).await?))
}

async fn delete_place(mut session: Session, Path(place_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    resources::remove::<Place>(&mut session, &place_id).await?;
    Ok(Json(Wire::new()))
}
