use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PeerId);

/// Whether a channel is a one-to-many broadcast or a discussion group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelInfo {
    Broadcast,
    Group,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRights {
    #[serde(default)]
    pub invite_users: bool,
    #[serde(default)]
    pub ban_users: bool,
}

impl AdminRights {
    pub fn all() -> Self {
        Self {
            invite_users: true,
            ban_users: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeerKind {
    User,
    Group,
    Channel {
        info: ChannelInfo,
        #[serde(default)]
        admin_rights: AdminRights,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub id: PeerId,
    pub display_title: String,
    pub kind: PeerKind,
}

impl Peer {
    pub fn user(id: PeerId, display_title: impl Into<String>) -> Self {
        Self {
            id,
            display_title: display_title.into(),
            kind: PeerKind::User,
        }
    }

    pub fn channel(
        id: PeerId,
        display_title: impl Into<String>,
        info: ChannelInfo,
        admin_rights: AdminRights,
    ) -> Self {
        Self {
            id,
            display_title: display_title.into(),
            kind: PeerKind::Channel { info, admin_rights },
        }
    }

    /// Rights the viewer holds on this peer. Only channels carry admin rights.
    pub fn admin_rights(&self) -> Option<AdminRights> {
        match &self.kind {
            PeerKind::Channel { admin_rights, .. } => Some(*admin_rights),
            PeerKind::User | PeerKind::Group => None,
        }
    }

    pub fn channel_info(&self) -> Option<ChannelInfo> {
        match &self.kind {
            PeerKind::Channel { info, .. } => Some(*info),
            PeerKind::User | PeerKind::Group => None,
        }
    }
}

/// The channel screen's view of its own peer; `peer` is `None` until loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerView {
    pub peer_id: PeerId,
    #[serde(default)]
    pub peer: Option<Peer>,
}

impl PeerView {
    pub fn loaded(peer: Peer) -> Self {
        Self {
            peer_id: peer.id,
            peer: Some(peer),
        }
    }
}
