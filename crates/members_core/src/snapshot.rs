use std::collections::HashSet;

use shared::{domain::PeerId, participant::RenderedParticipant};
use tracing::debug;

/// Participants ordered for display: invite time ascending, creator first.
/// Ties keep their snapshot order.
pub fn sort_participants(participants: &[RenderedParticipant]) -> Vec<&RenderedParticipant> {
    let mut sorted: Vec<&RenderedParticipant> = participants.iter().collect();
    sorted.sort_by_key(|participant| participant.participant.invited_at_sort_key());
    sorted
}

/// Local optimistic changes layered over the server's snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LocalOverlay {
    added: Vec<RenderedParticipant>,
    removed: HashSet<PeerId>,
}

/// Reduces `(server snapshot, local overlay)` into the snapshot the screen
/// renders. The server snapshot is never edited; overlay entries are dropped
/// once a later server snapshot agrees with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSnapshot {
    server: Option<Vec<RenderedParticipant>>,
    overlay: LocalOverlay,
}

impl MemberSnapshot {
    pub fn is_loaded(&self) -> bool {
        self.server.is_some()
    }

    /// Replaces the server snapshot. `None` means the list is unknown again.
    pub fn set_server(&mut self, snapshot: Option<Vec<RenderedParticipant>>) {
        if let Some(server) = &snapshot {
            let present: HashSet<PeerId> = server.iter().map(RenderedParticipant::peer_id).collect();
            let before = (self.overlay.added.len(), self.overlay.removed.len());
            self.overlay
                .added
                .retain(|participant| !present.contains(&participant.peer_id()));
            self.overlay.removed.retain(|peer_id| present.contains(peer_id));
            let after = (self.overlay.added.len(), self.overlay.removed.len());
            if before != after {
                debug!(
                    pending_added = after.0,
                    pending_removed = after.1,
                    "server snapshot confirmed local member changes"
                );
            }
        }
        self.server = snapshot;
    }

    /// Records an optimistic add. Returns `false` when the peer is already
    /// visible, in which case nothing changes.
    pub fn apply_added(&mut self, participant: RenderedParticipant) -> bool {
        let peer_id = participant.peer_id();
        let already_pending = self
            .overlay
            .added
            .iter()
            .any(|pending| pending.peer_id() == peer_id);
        if already_pending || self.contains(peer_id) {
            return false;
        }
        if self.overlay.removed.remove(&peer_id) && self.contains(peer_id) {
            return true;
        }
        self.overlay.added.push(participant);
        true
    }

    /// Records a confirmed removal. Returns `false` when the peer is not
    /// visible, in which case nothing changes.
    pub fn apply_removed(&mut self, peer_id: PeerId) -> bool {
        if !self.contains(peer_id) {
            return false;
        }
        self.overlay
            .added
            .retain(|participant| participant.peer_id() != peer_id);
        self.overlay.removed.insert(peer_id);
        true
    }

    pub fn contains(&self, peer_id: PeerId) -> bool {
        self.rendered()
            .is_some_and(|participants| participants.iter().any(|p| p.peer_id() == peer_id))
    }

    /// The snapshot to display, or `None` while the server list is unknown.
    /// Duplicate peers keep their first occurrence.
    pub fn rendered(&self) -> Option<Vec<RenderedParticipant>> {
        let server = self.server.as_ref()?;
        let mut seen = HashSet::with_capacity(server.len() + self.overlay.added.len());
        let rendered = server
            .iter()
            .chain(self.overlay.added.iter())
            .filter(|participant| !self.overlay.removed.contains(&participant.peer_id()))
            .filter(|participant| seen.insert(participant.peer_id()))
            .cloned()
            .collect();
        Some(rendered)
    }
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
