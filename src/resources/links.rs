//! Place ↔ amenity links.
//!
//! A place keeps the ids of its amenities in `amenity_ids`. These operations are the
//! only way that list changes; amenities themselves are never modified.

use super::{require, wire_all, ApiError, Wire};
use crate::model::{Amenity, Entity, Place};
use crate::storage::Session;
use tracing::info;

/// Outcome of [`link`]: whether a new link was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linked {
    Created,
    Existing,
}

/// Amenities linked to a place. Ids whose amenity has since been deleted are skipped.
pub async fn list(session: &Session, place_id: &str) -> Result<Vec<Wire>, ApiError> {
    let place = require::<Place>(session, place_id).await?;
    let mut amenities = Vec::with_capacity(place.amenity_ids.len());
    for amenity_id in &place.amenity_ids {
        if let Some(amenity) = session.get::<Amenity>(amenity_id).await? {
            amenities.push(amenity);
        }
    }
    wire_all(amenities)
}

/// Links an amenity to a place and returns the amenity.
pub async fn link(session: &mut Session, place_id: &str, amenity_id: &str) -> Result<(Wire, Linked), ApiError> {
    let mut place = require::<Place>(session, place_id).await?;
    let amenity = require::<Amenity>(session, amenity_id).await?;

    if !place.link_amenity(amenity_id) {
        return Ok((amenity.to_wire()?, Linked::Existing));
    }
    session.add(place);
    session.save().await?;
    info!(%place_id, %amenity_id, "Amenity linked");
    Ok((amenity.to_wire()?, Linked::Created))
}

/// Removes the link. Fails with `NotFound` if either side is missing or they were
/// not linked.
pub async fn unlink(session: &mut Session, place_id: &str, amenity_id: &str) -> Result<(), ApiError> {
    let mut place = require::<Place>(session, place_id).await?;
    require::<Amenity>(session, amenity_id).await?;

    if !place.unlink_amenity(amenity_id) {
        return Err(ApiError::NotFound);
    }
    session.add(place);
    session.save().await?;
    info!(%place_id, %amenity_id, "Amenity unlinked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{remove, show};
    use crate::storage::{Storage, Tables};

    async fn seeded() -> (Storage, Place, Amenity) {
        let (tables, _handles) = Tables::spawn(Vec::new());
        let storage = Storage::new(tables);
        let place = Place::new("c", "u", "Loft");
        let amenity = Amenity::new("Wifi");
        let mut session = storage.session();
        session.add(place.clone());
        session.add(amenity.clone());
        session.save().await.unwrap();
        (storage, place, amenity)
    }

    #[tokio::test]
    async fn test_link_is_idempotent() {
        let (storage, place, amenity) = seeded().await;
        let mut session = storage.session();

        let (wire, linked) = link(&mut session, &place.base.id, &amenity.base.id).await.unwrap();
        assert_eq!(linked, Linked::Created);
        assert_eq!(wire, show::<Amenity>(&session, &amenity.base.id).await.unwrap());

        let (wire, linked) = link(&mut session, &place.base.id, &amenity.base.id).await.unwrap();
        assert_eq!(linked, Linked::Existing);
        assert_eq!(wire["name"], "Wifi");

        let listed = list(&session, &place.base.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["name"], "Wifi");
    }

    #[tokio::test]
    async fn test_unlink_requires_existing_link() {
        let (storage, place, amenity) = seeded().await;
        let mut session = storage.session();

        let err = unlink(&mut session, &place.base.id, &amenity.base.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));

        link(&mut session, &place.base.id, &amenity.base.id).await.unwrap();
        unlink(&mut session, &place.base.id, &amenity.base.id).await.unwrap();
        assert!(list(&session, &place.base.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_sides_are_not_found() {
        let (storage, place, amenity) = seeded().await;
        let mut session = storage.session();

        assert!(matches!(
            link(&mut session, "nope", &amenity.base.id).await.unwrap_err(),
            ApiError::NotFound
        ));
        assert!(matches!(
            link(&mut session, &place.base.id, "nope").await.unwrap_err(),
            ApiError::NotFound
        ));
        assert!(matches!(list(&session, "nope").await.unwrap_err(), ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_deleted_amenity_is_skipped_in_listing() {
        let (storage, place, amenity) = seeded().await;
        let mut session = storage.session();
        link(&mut session, &place.base.id, &amenity.base.id).await.unwrap();
        remove::<Amenity>(&mut session, &amenity.base.id).await.unwrap();

        assert!(list(&session, &place.base.id).await.unwrap().is_empty());
    }
}
