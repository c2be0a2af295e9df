//! # HTTP API
//!
//! Axum routes for the REST surface, all mounted under `/api/v1`. Handlers are thin:
//! they extract a [`Session`](crate::storage::Session), hand the path and raw body to a
//! [`resources`](crate::resources) operation and pick the status code. Every response
//! body is JSON, errors included (`{"error": "..."}`). A trailing slash is trimmed
//! before routing, so `/api/v1/states/` and `/api/v1/states` are the same route.

mod amenities;
mod cities;
pub mod error;
mod extract;
mod index;
mod place_amenities;
mod places;
mod reviews;
mod states;
mod users;

use crate::storage::Storage;
use axum::Router;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

/// The service to serve: [`router`] behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

pub fn app(storage: Storage) -> App {
    NormalizePath::trim_trailing_slash(router(storage))
}

/// Builds the application router over `storage`.
///
/// Paths must match exactly here; serve [`app`] to accept trailing slashes.
pub fn router(storage: Storage) -> Router {
    let v1 = Router::new()
        .merge(index::router())
        .merge(states::router())
        .merge(cities::router())
        .merge(amenities::router())
        .merge(users::router())
        .merge(places::router())
        .merge(reviews::router())
        .merge(place_amenities::router());

    Router::new()
        .nest(API_PREFIX, v1)
        .fallback(error::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(storage)
}
