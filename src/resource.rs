//! Generic loading state machine shared by every view.
//!
//! A [`Resource`] is keyed by what it fetches (nothing for the country list, a
//! country code for a detail page) and moves through
//! `Loading → {Success, ErrorNetwork, ErrorEmpty}`. Each fetch is started under a
//! [`Ticket`]; results presented with an outdated ticket are dropped, so a slow
//! response for an earlier key can never overwrite a newer one.

use crate::api::ApiError;

/// Decides whether a successful fetch produced usable content.
pub trait Classify {
    type Content;

    /// `None` when the result is an empty list or an absent record.
    fn classify(self) -> Option<Self::Content>;
}

impl<T> Classify for Vec<T> {
    type Content = Vec<T>;

    fn classify(self) -> Option<Vec<T>> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl<T> Classify for Option<T> {
    type Content = T;

    fn classify(self) -> Option<T> {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Success(T),
    ErrorNetwork(ApiError),
    ErrorEmpty,
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Only network failures offer a retry; an empty result will not improve.
    pub fn can_retry(&self) -> bool {
        matches!(self, LoadState::ErrorNetwork(_))
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            LoadState::Success(t) => Some(t),
            _ => None,
        }
    }
}

/// Generation a fetch was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct Resource<K, R: Classify> {
    key: K,
    generation: u64,
    state: LoadState<R::Content>,
}

impl<K: Clone, R: Classify> Resource<K, R> {
    /// Enter `Loading` for `key`. The returned ticket must accompany the result.
    pub fn start(key: K) -> (Self, Ticket) {
        let res = Self {
            key,
            generation: 1,
            state: LoadState::Loading,
        };
        (res, Ticket(1))
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn state(&self) -> &LoadState<R::Content> {
        &self.state
    }

    /// Switch to `key` and restart. Prior content is dropped immediately.
    pub fn navigate(&mut self, key: K) -> Ticket {
        self.key = key;
        self.restart()
    }

    /// Re-issue the same fetch after a network error. Returns `None` in any
    /// other state.
    pub fn retry(&mut self) -> Option<Ticket> {
        if self.state.can_retry() {
            Some(self.restart())
        } else {
            None
        }
    }

    fn restart(&mut self) -> Ticket {
        self.generation += 1;
        self.state = LoadState::Loading;
        Ticket(self.generation)
    }

    /// Apply a fetch outcome. Returns `false` (and changes nothing) when the
    /// ticket is stale or the current fetch has already been resolved.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<R, ApiError>) -> bool {
        if ticket.0 != self.generation || !self.state.is_loading() {
            log::debug!(
                "discarding result for generation {} (current {})",
                ticket.generation(),
                self.generation
            );
            return false;
        }
        self.state = match outcome {
            Ok(r) => match r.classify() {
                Some(content) => LoadState::Success(content),
                None => LoadState::ErrorEmpty,
            },
            Err(e) => LoadState::ErrorNetwork(e),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net_err() -> ApiError {
        ApiError {
            status: Some(503),
            message: "down".into(),
            endpoint: "/countries".into(),
        }
    }

    #[test]
    fn list_classification() {
        let (mut r, t) = Resource::<(), Vec<u8>>::start(());
        assert!(r.state().is_loading());
        assert!(r.resolve(t, Ok(vec![])));
        assert_eq!(r.state(), &LoadState::ErrorEmpty);
        assert!(!r.state().can_retry());
        assert_eq!(r.retry(), None);
    }

    #[test]
    fn retry_only_after_network_error() {
        let (mut r, t) = Resource::<(), Vec<u8>>::start(());
        assert_eq!(r.retry(), None, "no retry while loading");
        r.resolve(t, Err(net_err()));
        let t2 = r.retry().expect("retry offered");
        assert_eq!(t2.generation(), t.generation() + 1);
        assert!(r.state().is_loading());
        assert!(!r.resolve(t, Ok(vec![1])), "old ticket is stale");
        assert!(r.resolve(t2, Ok(vec![1])));
        assert_eq!(r.state().content(), Some(&vec![1]));
    }

    #[test]
    fn second_resolution_is_ignored() {
        let (mut r, t) = Resource::<&str, Option<u8>>::start("A");
        assert!(r.resolve(t, Ok(Some(1))));
        assert!(!r.resolve(t, Ok(Some(2))));
        assert_eq!(r.state(), &LoadState::Success(1));
    }
}
