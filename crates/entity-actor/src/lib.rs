//! # Entity Actor
//!
//! Building blocks for keeping typed record tables behind actors. Each table is owned by
//! one [`ResourceActor`] task; everything else talks to it through a cloneable
//! [`ResourceClient`]. Because the actor handles one message at a time, concurrent
//! readers and writers never race on the table, and no lock is taken anywhere.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - how a record is identified and stamped on save
//! 2. **Runtime Layer** ([`ResourceActor`]) - the table and its message loop
//! 3. **Interface Layer** ([`ResourceClient`]) - `get`, `all`, `count`, `save`, `delete`
//!
//! ```rust
//! use entity_actor::{ActorEntity, ResourceActor};
//!
//! #[derive(Clone, Debug)]
//! struct City { id: String, name: String }
//!
//! impl ActorEntity for City {
//!     type Id = String;
//!     fn id(&self) -> &String { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<City>::new(32);
//!     tokio::spawn(actor.run());
//!
//!     client.save(City { id: "c1".into(), name: "Napa".into() }).await.unwrap();
//!     let city = client.get("c1".into()).await.unwrap().unwrap();
//!     assert_eq!(city.name, "Napa");
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, which answers a real `ResourceClient` from a
//! queue of expectations and reports any request nobody asked for.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
