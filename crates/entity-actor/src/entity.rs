//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type must satisfy to be kept in a
//! [`ResourceActor`](crate::ResourceActor) table. The actor only needs to know how to
//! find an entity's identifier and how to stamp it when a write is accepted; everything
//! else about the record (fields, validation, wire form) belongs to the application.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// # Architecture Note
/// One actor owns one table. Writing the table logic once against this trait means
/// States, Cities, Places and the rest all share the same message loop, and the
/// compiler keeps a `City` from ever landing in the `State` table.
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::on_save`] runs inside the actor right before a write is stored.
///   The default does nothing.
pub trait ActorEntity: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The identifier the entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Called by the actor for every accepted `Save`, before the entity is stored.
    ///
    /// The returned copy of a save reflects whatever this hook changed, so callers
    /// never have to re-read to observe it.
    fn on_save(&mut self) {}
}
