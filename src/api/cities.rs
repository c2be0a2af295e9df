use crate::model::City;
use crate::resources::{self, ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{body::Bytes, extract::Path, http::StatusCode, routing::get, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route(
            "/states/:state_id/cities",
            get(list_cities).post(create_city),
        )
        .route(
            "/cities/:city_id",
            get(get_city).put(update_city).delete(delete_city),
        )
}

async fn list_cities(session: Session, Path(state_id): Path<String>) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(resources::list_children::<City>(&session, &state_id).await?))
}

async fn get_city(session: Session, Path(city_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::show::<City>(&session, &city_id).await?))
}

async fn create_city(
    mut session: Session,
    Path(state_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let city = resources::create_child::<City>(&mut session, &state_id, &body).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

async fn update_city(
    mut session: Session,
    Path(city_id): Path<String>,
    body: Bytes,
) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::update::<City>(&mut session, &city_id, &body).await?))
}

async fn delete_city(mut session: Session, Path(city_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    resources::remove::<City>(&mut session, &city_id).await?;
    Ok(Json(Wire::new()))
}
