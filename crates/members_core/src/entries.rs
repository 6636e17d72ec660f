//! Rows of the members screen and the function that builds them.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{PeerId, PeerView},
    participant::RenderedParticipant,
};

use crate::{
    permissions::{can_ban_users, can_invite_users, is_row_editable},
    presentation::{PresentationData, Strings, Theme},
    reconcile::ListEntry,
    snapshot::sort_participants,
    state::ControllerState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    AddMembers,
    Peers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StableId {
    Index(i32),
    Peer(PeerId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeerItemEditing {
    pub editable: bool,
    pub editing: bool,
    pub revealed: bool,
}

#[derive(Debug, Clone)]
pub enum Entry {
    AddMember {
        theme: Arc<Theme>,
        text: String,
    },
    InviteLink {
        theme: Arc<Theme>,
        text: String,
    },
    AddMemberInfo {
        theme: Arc<Theme>,
        text: String,
    },
    Member {
        index: usize,
        theme: Arc<Theme>,
        strings: Arc<Strings>,
        participant: RenderedParticipant,
        editing: PeerItemEditing,
        enabled: bool,
    },
}

impl Entry {
    pub fn section(&self) -> SectionId {
        match self {
            Self::AddMember { .. } | Self::InviteLink { .. } | Self::AddMemberInfo { .. } => {
                SectionId::AddMembers
            }
            Self::Member { .. } => SectionId::Peers,
        }
    }

    pub fn stable_id(&self) -> StableId {
        match self {
            Self::AddMember { .. } => StableId::Index(0),
            Self::AddMemberInfo { .. } => StableId::Index(1),
            Self::InviteLink { .. } => StableId::Index(2),
            Self::Member { participant, .. } => StableId::Peer(participant.peer_id()),
        }
    }

    /// Position key within a render pass: section first, then rank.
    pub fn sort_key(&self) -> (SectionId, usize) {
        let rank = match self {
            Self::AddMember { .. } => 0,
            Self::InviteLink { .. } => 1,
            Self::AddMemberInfo { .. } => 2,
            Self::Member { index, .. } => *index,
        };
        (self.section(), rank)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::AddMember { theme, text },
                Self::AddMember {
                    theme: other_theme,
                    text: other_text,
                },
            )
            | (
                Self::InviteLink { theme, text },
                Self::InviteLink {
                    theme: other_theme,
                    text: other_text,
                },
            )
            | (
                Self::AddMemberInfo { theme, text },
                Self::AddMemberInfo {
                    theme: other_theme,
                    text: other_text,
                },
            ) => Arc::ptr_eq(theme, other_theme) && text == other_text,
            (
                Self::Member {
                    index,
                    theme,
                    strings,
                    participant,
                    editing,
                    enabled,
                },
                Self::Member {
                    index: other_index,
                    theme: other_theme,
                    strings: other_strings,
                    participant: other_participant,
                    editing: other_editing,
                    enabled: other_enabled,
                },
            ) => {
                index == other_index
                    && Arc::ptr_eq(theme, other_theme)
                    && Arc::ptr_eq(strings, other_strings)
                    && participant == other_participant
                    && editing == other_editing
                    && enabled == other_enabled
            }
            _ => false,
        }
    }
}

impl ListEntry for Entry {
    type StableId = StableId;

    fn stable_id(&self) -> StableId {
        Entry::stable_id(self)
    }
}

/// Orders rows by [`Entry::sort_key`]. The sort is stable.
fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(Entry::sort_key);
}

/// Builds the screen's rows in display order. An unknown participant list
/// yields no rows.
pub fn channel_members_entries(
    viewer: PeerId,
    presentation: &PresentationData,
    view: &PeerView,
    state: &ControllerState,
    participants: Option<&[RenderedParticipant]>,
) -> Vec<Entry> {
    let Some(participants) = participants else {
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(participants.len() + 3);
    let strings = &presentation.strings;

    if can_invite_users(view) {
        entries.push(Entry::AddMember {
            theme: Arc::clone(&presentation.theme),
            text: strings.add_members.clone(),
        });
        entries.push(Entry::AddMemberInfo {
            theme: Arc::clone(&presentation.theme),
            text: strings.add_members_help.clone(),
        });
        entries.push(Entry::InviteLink {
            theme: Arc::clone(&presentation.theme),
            text: strings.invite_link.clone(),
        });
    }

    let can_ban = can_ban_users(view);
    for (index, participant) in sort_participants(participants).into_iter().enumerate() {
        let peer_id = participant.peer_id();
        entries.push(Entry::Member {
            index,
            theme: Arc::clone(&presentation.theme),
            strings: Arc::clone(&presentation.strings),
            participant: participant.clone(),
            editing: PeerItemEditing {
                editable: is_row_editable(viewer, participant, can_ban),
                editing: state.editing,
                revealed: state.revealed_peer_id == Some(peer_id),
            },
            enabled: state.removing_peer_id != Some(peer_id),
        });
    }

    sort_entries(&mut entries);
    entries
}

#[cfg(test)]
#[path = "tests/entries_tests.rs"]
mod tests;
