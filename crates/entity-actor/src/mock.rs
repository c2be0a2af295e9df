//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose messages are answered
//! from a queue of expectations instead of a table. It lets code built on top of the
//! client (a persistence facade, a request handler) be tested for *which* calls it makes,
//! not only for what it returns.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Asserting a write never happens | Testing stored behavior end to end |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Unexpected requests
//!
//! A request that does not match the next expectation is recorded and its response
//! channel is dropped, so the caller sees [`FrameworkError::ActorDropped`]. [`MockClient::verify`]
//! then fails the test, naming the request.
//!
//! ```rust
//! use entity_actor::mock::MockClient;
//! use entity_actor::ActorEntity;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Tag { id: u32 }
//! impl ActorEntity for Tag {
//!     type Id = u32;
//!     fn id(&self) -> &u32 { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_get(1).return_ok(Some(Tag { id: 1 }));
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap(), Some(Tag { id: 1 }));
//!
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    All {
        response: Result<Vec<T>, FrameworkError>,
    },
    Count {
        response: Result<usize, FrameworkError>,
    },
    Save {
        /// `None` echoes the saved item back (after `on_save`).
        response: Option<Result<T, FrameworkError>>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<State>::new();
/// mock.expect_get("s1".to_string()).return_ok(None);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met and nothing else was asked
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    unexpected: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let unexpected_clone = unexpected.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();
                if let Err(request) = answer(request, expectation) {
                    // Record before the responder is dropped so `verify` sees it.
                    unexpected_clone.lock().unwrap().push(describe(&request));
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `all` operation.
    pub fn expect_all(&mut self) -> AllExpectationBuilder<T> {
        AllExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `count` operation.
    pub fn expect_count(&mut self) -> CountExpectationBuilder<T> {
        CountExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `save` operation.
    pub fn expect_save(&mut self) -> SaveExpectationBuilder<T> {
        SaveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no other request arrived.
    pub fn verify(&self) {
        let unexpected = self.unexpected.lock().unwrap();
        if !unexpected.is_empty() {
            panic!("Unexpected requests: {}", unexpected.join(", "));
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Answers `request` from `expectation`, or hands the request back on a mismatch.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), ResourceRequest<T>> {
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response }))
            if id == want =>
        {
            let _ = respond_to.send(response);
            Ok(())
        }
        (ResourceRequest::All { respond_to }, Some(Expectation::All { response })) => {
            let _ = respond_to.send(response);
            Ok(())
        }
        (ResourceRequest::Count { respond_to }, Some(Expectation::Count { response })) => {
            let _ = respond_to.send(response);
            Ok(())
        }
        (ResourceRequest::Save { mut item, respond_to }, Some(Expectation::Save { response })) => {
            let response = response.unwrap_or_else(|| {
                item.on_save();
                Ok(item)
            });
            let _ = respond_to.send(response);
            Ok(())
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) if id == want => {
            let _ = respond_to.send(response);
            Ok(())
        }
        (request, _) => Err(request),
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Get { id, .. } => format!("Get({id})"),
        ResourceRequest::All { .. } => "All".to_string(),
        ResourceRequest::Count { .. } => "Count".to_string(),
        ResourceRequest::Save { item, .. } => format!("Save({})", item.id()),
        ResourceRequest::Delete { id, .. } => format!("Delete({id})"),
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response,
        });
    }
}

/// Builder for `all` expectations.
pub struct AllExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> AllExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::All { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::All { response: Err(error) });
    }
}

/// Builder for `count` expectations.
pub struct CountExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CountExpectationBuilder<T> {
    pub fn return_ok(self, count: usize) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Count { response: Ok(count) });
    }
}

/// Builder for `save` expectations.
pub struct SaveExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> SaveExpectationBuilder<T> {
    /// Answers with the item that was sent, after running its `on_save` hook.
    pub fn return_saved(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Save { response: None });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Save {
                response: Some(Err(error)),
            });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Delete {
            id: self.id,
            response,
        });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// For tests that want to hold a request in flight, inspect it, and answer it by hand.
/// Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Save { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u32,
        label: String,
    }

    impl ActorEntity for Tag {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn on_save(&mut self) {
            self.label.push('!');
        }
    }

    fn tag(id: u32) -> Tag {
        Tag {
            id,
            label: format!("tag{id}"),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let save_task = tokio::spawn(async move { client.save(tag(7)).await });

        let (item, responder) = expect_save(&mut receiver).await.expect("Expected Save request");
        assert_eq!(item.id, 7);
        responder.send(Ok(item.clone())).unwrap();

        let result = save_task.await.unwrap();
        assert_eq!(result, Ok(tag(7)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_get(1).return_ok(None);
        mock.expect_save().return_saved();
        mock.expect_count().return_ok(1);
        mock.expect_delete(1).return_ok();

        let client = mock.client();
        assert!(client.get(1).await.unwrap().is_none());
        let saved = client.save(tag(1)).await.unwrap();
        assert_eq!(saved.label, "tag1!");
        assert_eq!(client.count().await.unwrap(), 1);
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_injected_errors_reach_the_caller() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_all().return_ok(vec![tag(1), tag(2)]);
        mock.expect_all().return_err(FrameworkError::ActorClosed);
        mock.expect_get(1).return_err(FrameworkError::ActorClosed);
        mock.expect_save().return_err(FrameworkError::ActorDropped);
        mock.expect_delete(3).return_err(FrameworkError::NotFound("3".to_string()));

        let client = mock.client();
        assert_eq!(client.all().await.unwrap(), vec![tag(1), tag(2)]);
        assert_eq!(client.all().await.unwrap_err(), FrameworkError::ActorClosed);
        assert_eq!(client.get(1).await.unwrap_err(), FrameworkError::ActorClosed);
        assert_eq!(client.save(tag(1)).await.unwrap_err(), FrameworkError::ActorDropped);
        assert_eq!(
            client.delete(3).await.unwrap_err(),
            FrameworkError::NotFound("3".to_string())
        );

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_reported() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let err = client.get(2).await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorDropped);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(outcome.is_err());
    }
}
