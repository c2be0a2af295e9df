use crate::model::Review;
use crate::resources::{self, ApiError, Wire};
use crate::storage::{Session, Storage};
use axum::{body::Bytes, extract::Path, http::StatusCode, routing::get, Json, Router};

pub fn router() -> Router<Storage> {
    Router::new()
        .route(
            "/places/:place_id/reviews",
            get(list_reviews).post(create_review),
        )
        .route(
            "/reviews/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

async fn list_reviews(session: Session, Path(place_id): Path<String>) -> Result<Json<Vec<Wire>>, ApiError> {
    Ok(Json(resources::list_children::<Review>(&session, &place_id).await?))
}

async fn get_review(session: Session, Path(review_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::show::<Review>(&session, &review_id).await?))
}

async fn create_review(
    mut session: Session,
    Path(place_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Wire>), ApiError> {
    let review = resources::create_child::<Review>(&mut session, &place_id, &body).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn update_review(
    mut session: Session,
    Path(review_id): Path<String>,
    body: Bytes,
) -> Result<Json<Wire>, ApiError> {
    Ok(Json(resources::update::<Review>(&mut session, &review_id, &body).await?))
}

async fn delete_review(mut session: Session, Path(review_id): Path<String>) -> Result<Json<Wire>, ApiError> {
    resources::remove::<Review>(&mut session, &review_id).await?;
    Ok(Json(Wire::new()))
}
