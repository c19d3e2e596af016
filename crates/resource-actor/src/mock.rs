//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of a running actor. It lets you test the logic that sits
//! *around* a client (domain wrappers, error mapping, submit guards) without a store.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant | Fast, but spawns a task and runs `fetch` |
//! | **Determinism** | Scripted responses | Depends on the store behind the context |
//! | **Use Case** | Client wrappers | The entity hooks and the reload contract |
//! | **Error Injection** | `return_err` | Requires a failing store |
//!
//! ## Testing Strategies
//!
//! 1. **Client logic (pure mock)**: script responses with [`MockClient`], or drive the
//!    raw channel with [`create_mock_client`] and the `expect_*` helpers when you need to
//!    inspect the request payload.
//! 2. **Single actor**: spawn a `ResourceActor` with an in-memory store as its context.
//! 3. **Full system**: start every actor through the application's orchestrator.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::ActorEntity;
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { id: u32, text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = u32; type Create = String; type Update = String; type Delete = ();
//!     type Action = (); type ActionResult = (); type Query = (); type Context = ();
//!     type Error = NoteError;
//!     fn id(&self) -> &u32 { &self.id }
//!     async fn fetch(_: &(), _: &()) -> Result<Vec<Self>, NoteError> { Ok(vec![]) }
//!     async fn on_create(text: String, _: &()) -> Result<Self, NoteError> { Ok(Note { id: 1, text }) }
//!     async fn on_update(id: &u32, text: String, _: &()) -> Result<Self, NoteError> { Ok(Note { id: *id, text }) }
//!     async fn on_delete(_: &u32, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//!     async fn handle_action(_: &u32, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_create().return_ok(Note { id: 7, text: "hi".into() });
//!
//!     let client = mock.client();
//!     let note = client.create("hi".into()).await.unwrap();
//!     assert_eq!(note.id, 7);
//!     mock.verify();
//! }
//! ```

use crate::message::{ResourceRequest, Snapshot};
use crate::{ActorEntity, FrameworkError, ResourceClient};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the scripted response for it.
enum Expectation<T: ActorEntity> {
    Load {
        response: Result<Snapshot<T>, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (wrong kind or wrong id) panics the mock task, which the caller sees as
/// `FrameworkError::ActorDropped`; [`MockClient::verify`] then reports the leftovers.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_action(id.clone()).return_ok(ProductActionResult::SetPurchased(true));
///
/// let client = ProductClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    snapshot: watch::Sender<Snapshot<T>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations and an empty snapshot.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (snapshot, watcher) = watch::channel(Arc::new(Vec::new()));
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Load { respond_to, .. },
                        Some(Expectation::Load { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to, .. },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, watcher),
            expectations,
            snapshot,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Publishes a snapshot to every client handed out by this mock.
    pub fn publish(&self, items: Vec<T>) {
        self.snapshot.send_replace(Arc::new(items));
    }

    /// Expects a `load` operation.
    pub fn expect_load(&mut self) -> ExpectationBuilder<T, Snapshot<T>> {
        self.builder(|response| Expectation::Load { response })
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }
}

/// Builder that records the response for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a client and the receiver its requests arrive on.
///
/// Use this instead of [`MockClient`] when the test needs to look at the request
/// payload (e.g. the exact `Create` params a wrapper built). The snapshot stays empty.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, watcher) = watch::channel(Arc::new(Vec::new()));
    (ResourceClient::new(sender, watcher), receiver)
}

/// Helper to verify that the next message is a Load request
pub async fn expect_load<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Option<T::Query>, Responder<Snapshot<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Load { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Delete, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u32,
        label: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("tag error")]
    struct TagError;

    #[async_trait]
    impl ActorEntity for Tag {
        type Id = u32;
        type Create = String;
        type Update = String;
        type Delete = ();
        type Action = ();
        type ActionResult = bool;
        type Query = ();
        type Context = ();
        type Error = TagError;

        fn id(&self) -> &u32 {
            &self.id
        }

        async fn fetch(_: &(), _: &()) -> Result<Vec<Self>, TagError> {
            Ok(Vec::new())
        }

        async fn on_create(label: String, _: &()) -> Result<Self, TagError> {
            Ok(Tag { id: 1, label })
        }

        async fn on_update(id: &u32, label: String, _: &()) -> Result<Self, TagError> {
            Ok(Tag { id: *id, label })
        }

        async fn on_delete(_: &u32, _: (), _: &()) -> Result<(), TagError> {
            Ok(())
        }

        async fn handle_action(_: &u32, _: (), _: &()) -> Result<bool, TagError> {
            Ok(true)
        }
    }

    fn tag(id: u32, label: &str) -> Tag {
        Tag {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let create_task = tokio::spawn(async move { client.create("urgent".to_string()).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload, "urgent");
        responder.send(Ok(tag(1, "urgent"))).unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result, tag(1, "urgent"));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_create().return_ok(tag(1, "urgent"));
        mock.expect_delete(1).return_ok(());
        mock.expect_load().return_ok(Arc::new(Vec::new()));

        let client = mock.client();
        let created = client.create("urgent".to_string()).await.unwrap();
        assert_eq!(created.id, 1);
        client.delete(1, ()).await.unwrap();
        assert!(client.load(None).await.unwrap().is_empty());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_publish_reaches_clients() {
        let mock = MockClient::<Tag>::new();
        let client = mock.client();
        let mut updates = client.subscribe();

        mock.publish(vec![tag(1, "a"), tag(2, "b")]);

        updates.changed().await.unwrap();
        assert_eq!(client.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_wrong_id_drops_response() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_update(1).return_ok(tag(1, "x"));

        let result = mock.client().update(2, "x".to_string()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
