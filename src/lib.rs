//! # HBNB API
//!
//! A REST API over six related entity types (State, City, Amenity, User, Place, Review)
//! backed by an actor-per-table storage engine with optional JSON-file persistence.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per table
//! Each entity type lives in its own `ResourceActor` from the `entity-actor` crate. The
//! actor processes messages sequentially, so the tables need no locks, and concurrent
//! requests are serialized per table.
//!
//! ### 2. Request-scoped sessions
//! Handlers never talk to the actors directly. They get a [`Session`](storage::Session),
//! stage writes on it and commit with `save()`. A request that fails before committing
//! leaves storage untouched; the session is closed when the handler returns.
//!
//! ### 3. Typed schemas
//! Request bodies are checked field by field against each type's schema
//! ([`model::Entity::FIELDS`]) before deserialization, which is what gives the API its
//! exact `Missing <field>` / `Invalid <field>` messages.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: the entity types, their schemas, `build` / `patch`.
//! - [`storage`]: table wiring, [`Session`](storage::Session), the snapshot file.
//! - [`resources`]: transport-independent operations (list, show, create, update,
//!   remove, stats, place/amenity links) and [`ApiError`](resources::ApiError).
//! - [`api`]: the axum router under `/api/v1`.
//! - [`config`] and [`lifecycle`]: environment configuration, startup and shutdown.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! HBNB_API_PORT=5000 HBNB_TYPE_STORAGE=file cargo run
//! curl -X POST localhost:5000/api/v1/states -d '{"name": "California"}'
//! ```

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod resources;
pub mod storage;
