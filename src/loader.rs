//! Runs a [`Resource`]'s fetches off the UI thread.
//!
//! Each fetch runs on its own short-lived thread and reports back over an `mpsc`
//! channel together with the ticket it was started under. The owner calls
//! [`Loader::poll`] from its event loop (or [`Loader::wait`] when it can block)
//! and the resource keeps only results for the current ticket.

use crate::api::ApiError;
use crate::resource::{Classify, LoadState, Resource, Ticket};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

pub type FetchFn<K, R> = Arc<dyn Fn(&K) -> Result<R, ApiError> + Send + Sync>;

type Outcome<R> = (Ticket, Result<R, ApiError>);

pub struct Loader<K, R: Classify> {
    resource: Resource<K, R>,
    fetch: FetchFn<K, R>,
    tx: Sender<Outcome<R>>,
    rx: Receiver<Outcome<R>>,
}

impl<K, R> Loader<K, R>
where
    K: Clone + Send + 'static,
    R: Classify + Send + 'static,
{
    /// Enter `Loading` for `key` and start the first fetch.
    pub fn start(key: K, fetch: FetchFn<K, R>) -> Self {
        let (tx, rx) = mpsc::channel();
        let (resource, ticket) = Resource::start(key);
        let loader = Self {
            resource,
            fetch,
            tx,
            rx,
        };
        loader.spawn(ticket);
        loader
    }

    fn spawn(&self, ticket: Ticket) {
        let key = self.resource.key().clone();
        let fetch = Arc::clone(&self.fetch);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = fetch(&key);
            // Receiver gone means the view was closed; nothing to report to.
            let _ = tx.send((ticket, outcome));
        });
    }

    pub fn key(&self) -> &K {
        self.resource.key()
    }

    pub fn state(&self) -> &LoadState<R::Content> {
        self.resource.state()
    }

    /// Point the view at a new key. Shows `Loading` right away; whatever the
    /// previous fetch returns later is discarded.
    pub fn navigate(&mut self, key: K) {
        let ticket = self.resource.navigate(key);
        self.spawn(ticket);
    }

    /// Re-issue the current fetch after a network error. Returns `false` when
    /// the current state offers no retry.
    pub fn retry(&mut self) -> bool {
        match self.resource.retry() {
            Some(ticket) => {
                self.spawn(ticket);
                true
            }
            None => false,
        }
    }

    /// Apply every finished fetch without blocking. Returns `true` when the
    /// visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((ticket, outcome)) = self.rx.try_recv() {
            changed |= self.resource.resolve(ticket, outcome);
        }
        changed
    }

    /// Block until the current fetch resolves or `timeout` elapses. Returns
    /// `true` if the state left `Loading`.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.resource.state().is_loading() {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok((ticket, outcome)) => {
                    self.resource.resolve(ticket, outcome);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                // We hold a sender ourselves, so this only happens on teardown.
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }
}
