use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::errors::{Error, Result};

/// Gate shared between a pipeline's publisher and its handle. Publishing and
/// disposal contend on the same lock, so a value can never slip out after
/// `dispose` has returned.
#[derive(Default)]
pub(crate) struct PublishGate {
    disposed: Mutex<bool>,
}

impl PublishGate {
    fn close(&self) {
        let mut disposed = self
            .disposed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *disposed = true;
    }

    fn is_closed(&self) -> bool {
        *self
            .disposed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sending half of a pipeline. Owned by the spawned task; dropping it without
/// publishing (including on abort) wakes waiting subscribers with a
/// cancellation error.
pub(crate) struct Publisher<T> {
    tx: watch::Sender<Option<Result<T>>>,
    gate: Arc<PublishGate>,
}

impl<T> Publisher<T> {
    pub(crate) fn publish(&self, result: Result<T>) {
        let disposed = self
            .gate
            .disposed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !*disposed {
            let _ = self.tx.send(Some(result));
        }
    }
}

/// Creates a connected publisher/subscription pair plus the gate their
/// handle needs.
pub(crate) fn channel<T>() -> (Publisher<T>, Subscription<T>, Arc<PublishGate>) {
    let (tx, rx) = watch::channel(None);
    let gate = Arc::new(PublishGate::default());
    (
        Publisher {
            tx,
            gate: Arc::clone(&gate),
        },
        Subscription { rx },
        gate,
    )
}

/// Creates a subscription whose pipeline was never started; receiving from it
/// yields `Error::Cancelled` immediately.
pub(crate) fn cancelled<T>() -> Subscription<T> {
    let (_tx, rx) = watch::channel(None);
    Subscription { rx }
}

/// Receiving end of one asynchronous pipeline. Cloning yields another view of
/// the same pipeline; it does not restart any work.
pub struct Subscription<T> {
    rx: watch::Receiver<Option<Result<T>>>,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T: Clone> Subscription<T> {
    /// Waits for the pipeline's single published outcome. Returns
    /// `Error::Cancelled` if the pipeline was disposed before it published.
    pub async fn recv(&mut self) -> Result<T> {
        loop {
            if let Some(result) = self.rx.borrow_and_update().clone() {
                return result;
            }
            if self.rx.changed().await.is_err() {
                // Publisher dropped; a value may still have landed first.
                return match self.rx.borrow().clone() {
                    Some(result) => result,
                    None => Err(Error::Cancelled),
                };
            }
        }
    }

    /// The latest published outcome, if any, without waiting.
    pub fn latest(&self) -> Option<Result<T>> {
        self.rx.borrow().clone()
    }
}

/// Opaque cancellable reference to one in-flight pipeline.
pub struct SubscriptionHandle {
    abort: AbortHandle,
    gate: Arc<PublishGate>,
}

impl SubscriptionHandle {
    pub(crate) fn new(abort: AbortHandle, gate: Arc<PublishGate>) -> Self {
        Self { abort, gate }
    }

    /// Suppresses any future publish, then cancels the task.
    pub fn dispose(&self) {
        self.gate.close();
        self.abort.abort();
    }

    pub fn is_disposed(&self) -> bool {
        self.gate.is_closed()
    }
}

#[derive(Default)]
struct RegistryState {
    handles: Vec<SubscriptionHandle>,
    closed: bool,
}

/// Ordered collection of the handles created by a repository, drained by the
/// owning controller on teardown. Once closed, late registrations are
/// disposed on the spot instead of being retained.
#[derive(Default)]
pub struct DisposalRegistry {
    inner: Mutex<RegistryState>,
}

impl DisposalRegistry {
    pub fn register(&self, handle: SubscriptionHandle) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            drop(state);
            handle.dispose();
        } else {
            state.handles.push(handle);
        }
    }

    /// Marks the registry closed and takes every outstanding handle in one
    /// step, so no registration can land between the collect and the clear.
    pub fn close_and_drain(&self) -> Vec<SubscriptionHandle> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.closed = true;
        std::mem::take(&mut state.handles)
    }

    pub fn is_closed(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handles
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
