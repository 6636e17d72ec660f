use serde::{Deserialize, Serialize};
use shared::domain::PeerId;
use tokio::sync::watch;

/// UI state of the members screen. Values are replaced, never edited in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    #[serde(default)]
    pub editing: bool,
    #[serde(default)]
    pub revealed_peer_id: Option<PeerId>,
    #[serde(default)]
    pub removing_peer_id: Option<PeerId>,
}

impl ControllerState {
    pub fn with_updated_editing(self, editing: bool) -> Self {
        Self { editing, ..self }
    }

    pub fn with_updated_revealed_peer_id(self, revealed_peer_id: Option<PeerId>) -> Self {
        Self {
            revealed_peer_id,
            ..self
        }
    }

    pub fn with_updated_removing_peer_id(self, removing_peer_id: Option<PeerId>) -> Self {
        Self {
            removing_peer_id,
            ..self
        }
    }

    /// Handles a row asking to reveal (`peer_id = Some`) or hide (`None`) its
    /// options. Only the revealed row may hide them, and a row may reveal only
    /// when the request comes from the closed state, so at most one row is
    /// ever revealed.
    pub fn with_revealed_options_request(
        self,
        peer_id: Option<PeerId>,
        from_peer_id: Option<PeerId>,
    ) -> Self {
        let closing_current = peer_id.is_none() && from_peer_id == self.revealed_peer_id;
        let opening_fresh = peer_id.is_some() && from_peer_id.is_none();
        if closing_current || opening_fresh {
            self.with_updated_revealed_peer_id(peer_id)
        } else {
            self
        }
    }
}

/// Single-writer container that publishes every distinct value to subscribers.
pub struct StateStore<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> StateStore<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value with `f(current)`. Returns whether it changed; equal
    /// values are not re-published.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        self.tx.send_if_modified(|current| {
            let next = f(current);
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
