use serde::{Deserialize, Serialize};

use crate::domain::{Peer, PeerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminInfo {
    pub promoted_by: PeerId,
    pub can_be_edited_by_viewer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanInfo {
    pub restricted_by: PeerId,
    pub timestamp: i64,
    pub is_member: bool,
}

/// Membership record of a peer within one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChannelParticipant {
    Creator {
        peer_id: PeerId,
    },
    Member {
        peer_id: PeerId,
        /// Unix seconds.
        invited_at: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        admin_info: Option<AdminInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ban_info: Option<BanInfo>,
    },
}

impl ChannelParticipant {
    pub fn member(peer_id: PeerId, invited_at: i64) -> Self {
        Self::Member {
            peer_id,
            invited_at,
            admin_info: None,
            ban_info: None,
        }
    }

    pub fn peer_id(&self) -> PeerId {
        match self {
            Self::Creator { peer_id } | Self::Member { peer_id, .. } => *peer_id,
        }
    }

    pub fn is_creator(&self) -> bool {
        matches!(self, Self::Creator { .. })
    }

    /// Sort key for the members list: the creator always precedes everyone.
    pub fn invited_at_sort_key(&self) -> i64 {
        match self {
            Self::Creator { .. } => i64::MIN,
            Self::Member { invited_at, .. } => *invited_at,
        }
    }
}

/// A participant joined with the peer it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedParticipant {
    pub participant: ChannelParticipant,
    pub peer: Peer,
}

impl RenderedParticipant {
    pub fn new(participant: ChannelParticipant, peer: Peer) -> Self {
        Self { participant, peer }
    }

    pub fn peer_id(&self) -> PeerId {
        self.peer.id
    }
}
