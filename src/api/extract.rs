//! Per-request storage session extractor.

use crate::storage::{Session, Storage};
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;

/// Every handler that names a `Session` argument gets a fresh one. It is closed when
/// the handler returns, whether or not it committed.
#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    Storage: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Storage::from_ref(state).session())
    }
}
