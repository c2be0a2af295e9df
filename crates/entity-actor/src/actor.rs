//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the task that owns one table of entities.
//! It implements the "Server" side of the Actor Model: messages are processed one at a
//! time, so every read and write against the table is serialized without a lock.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages one table of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Any number of request handlers may hold a [`ResourceClient`] to the same table, but
/// the actor processes their messages *sequentially* in a loop. Concurrent `get`,
/// `all`, `count`, `save` and `delete` calls are therefore safe against one another
/// without a `Mutex` or `RwLock` around the `store`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` (or `with_items()` to preload) to get the
///     `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Stop**: Drop every client; the loop drains and exits.
///
/// ```rust
/// use entity_actor::{ActorEntity, ResourceActor};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String }
///
/// impl ActorEntity for Note {
///     type Id = u32;
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     let handle = tokio::spawn(actor.run());
///
///     client.save(Note { id: 1, text: "hello".into() }).await.unwrap();
///     assert_eq!(client.count().await.unwrap(), 1);
///
///     drop(client);
///     handle.await.unwrap();
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new, empty `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_items(buffer_size, Vec::new())
    }

    /// Creates a `ResourceActor` whose table starts out holding `items`.
    ///
    /// Used when a snapshot is loaded at startup. Preloaded items are stored as-is;
    /// `on_save` is not run for them.
    pub fn with_items(buffer_size: usize, items: Vec<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        let actor = Self { receiver, store };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "State" instead of "hbnb_api::model::state::State")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::All { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, size = items.len(), "All");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Count { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "Count");
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::Save { mut item, respond_to } => {
                    item.on_save();
                    let id = item.id().clone();
                    let created = self.store.insert(id.clone(), item.clone()).is_none();
                    info!(entity_type, %id, created, size = self.store.len(), "Saved");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        saves: u32,
    }

    impl ActorEntity for Counter {
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }

        fn on_save(&mut self) {
            self.saves += 1;
        }
    }

    fn counter(id: &str) -> Counter {
        Counter {
            id: id.to_string(),
            saves: 0,
        }
    }

    #[tokio::test]
    async fn test_save_runs_hook_and_returns_stored_copy() {
        let (actor, client) = ResourceActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        let stored = client.save(counter("a")).await.unwrap();
        assert_eq!(stored.saves, 1);

        let again = client.save(stored).await.unwrap();
        assert_eq!(again.saves, 2);

        let fetched = client.get("a".to_string()).await.unwrap().unwrap();
        assert_eq!(fetched, again);
        assert_eq!(client.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_preloaded_items_are_visible_without_hook() {
        let (actor, client) =
            ResourceActor::<Counter>::with_items(8, vec![counter("a"), counter("b")]);
        tokio::spawn(actor.run());

        let mut all = client.all().await.unwrap();
        all.sort_by(|l, r| l.id.cmp(&r.id));
        assert_eq!(all, vec![counter("a"), counter("b")]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (actor, client) = ResourceActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        let err = client.delete("ghost".to_string()).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (actor, client) = ResourceActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        assert!(client.get("ghost".to_string()).await.unwrap().is_none());
        assert_eq!(client.count().await.unwrap(), 0);
        assert!(client.all().await.unwrap().is_empty());
    }
}
