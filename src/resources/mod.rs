//! # Resource Protocol
//!
//! Transport-independent operations behind every REST route. Each function takes the
//! request's [`Session`] and returns wire-form JSON or an [`ApiError`]; the HTTP layer
//! only picks status codes.
//!
//! Checks happen in a fixed order, and nothing is staged until all of them pass:
//!
//! 1. the parent (or target) entity exists, else `NotFound`
//! 2. the body is a JSON object, else `BadRequest("Not a JSON")`
//! 3. required fields are present, in declared order
//! 4. every other key is known and well-typed
//! 5. a referenced user exists (places and reviews)

pub mod error;
pub mod links;

pub use error::ApiError;

use crate::model::{build, patch, Child, Entity, EntityKind, User};
use crate::storage::{Session, Stored};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub type Wire = Map<String, Value>;

/// Parses a request body. Anything but a JSON object is rejected.
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::BadRequest("Not a JSON".to_string())),
    }
}

/// Fetches an entity or fails with `NotFound`.
pub async fn require<T: Stored>(session: &Session, id: &str) -> Result<T, ApiError> {
    session.get::<T>(id).await?.ok_or(ApiError::NotFound)
}

fn wire_all<T: Entity>(items: Vec<T>) -> Result<Vec<Wire>, ApiError> {
    items
        .iter()
        .map(|item| item.to_wire().map_err(ApiError::from))
        .collect()
}

/// Stages `item`, commits, and returns the stored copy.
async fn persist<T: Stored>(session: &mut Session, item: T) -> Result<T, ApiError> {
    let id = item.base().id.clone();
    session.add(item);
    session
        .save()
        .await?
        .into_iter()
        .filter_map(T::from_record)
        .find(|stored| stored.base().id == id)
        .ok_or(ApiError::NotFound)
}

async fn insert<T: Stored>(
    session: &mut Session,
    body: &[u8],
    injected: Map<String, Value>,
) -> Result<Wire, ApiError> {
    let body = parse_body(body)?;
    let item: T = build(&body, injected)?;
    if let Some(user_id) = item.owner_id() {
        require::<User>(session, user_id).await?;
    }
    let stored = persist(session, item).await?;
    info!(entity_type = %T::KIND, id = %stored.base().id, "Created");
    Ok(stored.to_wire()?)
}

/// All entities of a top-level collection.
pub async fn list<T: Stored>(session: &Session) -> Result<Vec<Wire>, ApiError> {
    wire_all(session.all::<T>().await?)
}

/// Children of one parent, e.g. the cities of a state.
pub async fn list_children<C>(session: &Session, parent_id: &str) -> Result<Vec<Wire>, ApiError>
where
    C: Child + Stored,
    C::Parent: Stored,
{
    require::<C::Parent>(session, parent_id).await?;
    let children = session
        .all::<C>()
        .await?
        .into_iter()
        .filter(|child| child.parent_id() == parent_id)
        .collect();
    wire_all(children)
}

pub async fn show<T: Stored>(session: &Session, id: &str) -> Result<Wire, ApiError> {
    Ok(require::<T>(session, id).await?.to_wire()?)
}

/// Creates a top-level entity (state, amenity, user).
pub async fn create<T: Stored>(session: &mut Session, body: &[u8]) -> Result<Wire, ApiError> {
    insert::<T>(session, body, Map::new()).await
}

/// Creates a child under `parent_id`. The parent link comes from the URL and
/// overrides anything in the body.
pub async fn create_child<C>(session: &mut Session, parent_id: &str, body: &[u8]) -> Result<Wire, ApiError>
where
    C: Child + Stored,
    C::Parent: Stored,
{
    require::<C::Parent>(session, parent_id).await?;
    let mut injected = Map::new();
    injected.insert(C::PARENT_KEY.to_string(), Value::from(parent_id));
    insert::<C>(session, body, injected).await
}

pub async fn update<T: Stored>(session: &mut Session, id: &str, body: &[u8]) -> Result<Wire, ApiError> {
    let current = require::<T>(session, id).await?;
    let body = parse_body(body)?;
    let updated = patch(&current, &body)?;
    let stored = persist(session, updated).await?;
    info!(entity_type = %T::KIND, %id, "Updated");
    Ok(stored.to_wire()?)
}

/// Deletes one entity. Children are not cascaded.
pub async fn remove<T: Stored>(session: &mut Session, id: &str) -> Result<(), ApiError> {
    let item = require::<T>(session, id).await?;
    session.delete(&item);
    session.save().await?;
    info!(entity_type = %T::KIND, %id, "Deleted");
    Ok(())
}

/// Entity counts keyed by collection name.
pub async fn stats(session: &Session) -> Result<BTreeMap<&'static str, usize>, ApiError> {
    let mut counts = BTreeMap::new();
    for kind in EntityKind::ALL {
        counts.insert(kind.collection(), session.count_kind(kind).await?);
    }
    debug!(?counts, "Stats");
    Ok(counts)
}
