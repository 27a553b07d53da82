//! # Mock Stores & Testing Guide
//!
//! [`MockStore<T>`] hands out a real [`StoreClient<T>`] whose requests are answered from a
//! queue of expectations instead of a running [`StoreActor`](crate::StoreActor). It lets
//! callers of a store (facades, registries, services) be tested deterministically,
//! including failures that are hard to provoke against a real actor.
//!
//! | | MockStore | Real StoreActor |
//! |---|---|---|
//! | **State** | none, only queued answers | real map |
//! | **Determinism** | fully scripted | sequential, but real |
//! | **Error injection** | `return_err(StoreError::ActorClosed)` | requires a dead actor |
//! | **Use case** | logic *around* a store | the store or the full system |
//!
//! ```rust
//! use entity_store::mock::MockStore;
//! use entity_store::{StoreEntity, StoreError};
//!
//! #[derive(Clone, Debug, PartialEq)] struct Lamp { id: u32, on: bool }
//! #[derive(Debug)] struct LampCreate;
//! #[derive(Debug)] struct LampUpdate;
//! #[derive(Debug)] enum LampAction {}
//! #[derive(Debug, thiserror::Error)] #[error("lamp error")] struct LampError;
//!
//! impl StoreEntity for Lamp {
//!     type Id = u32; type Create = LampCreate; type Update = LampUpdate;
//!     type Action = LampAction; type ActionResult = (); type Error = LampError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: LampCreate) -> Result<Self, Self::Error> { Ok(Self { id, on: false }) }
//!     fn on_update(&mut self, _: LampUpdate) -> Result<(), Self::Error> { Ok(()) }
//!     fn handle_action(&mut self, action: LampAction) -> Result<(), Self::Error> { match action {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Lamp>::new();
//!     mock.expect_get(1).return_ok(Some(Lamp { id: 1, on: true }));
//!     mock.expect_list().return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().unwrap().on);
//!     assert!(matches!(client.list().await, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For tests that want to inspect the raw request (payload, action arguments) use
//! [`create_mock_client`] together with [`expect_action`] or [`expect_put`].

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A queued answer for the next request. Ids are checked against the request.
enum Expectation<T: StoreEntity> {
    Create {
        response: Result<T, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Put {
        response: Result<Option<T>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A store client backed by scripted answers.
///
/// Expectations are consumed in FIFO order; a request that does not match the next
/// expectation (wrong operation or wrong id) panics the mock task, which the caller
/// observes as [`StoreError::ActorDropped`].
pub struct MockStore<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockStore<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Put { respond_to, .. }, Some(Expectation::Put { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_put(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Put { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Completes an expectation with either a value or an error.
pub struct ExpectationBuilder<T: StoreEntity, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: StoreEntity, R> ExpectationBuilder<T, R> {
    /// Answer the matching request with `Ok(value)`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer the matching request with `Err(error)`.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let Self { expectations, make } = self;
        expectations.lock().unwrap().push_back(make(response));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// The test plays the actor: it pulls requests off `receiver`, asserts on them, and
/// answers through the embedded one-shot sender.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Returns the next request if it is a Put.
pub async fn expect_put<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Put { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
pub async fn expect_action<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
