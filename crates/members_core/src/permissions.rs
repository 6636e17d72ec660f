use shared::{
    domain::{AdminRights, Peer, PeerId, PeerView},
    participant::RenderedParticipant,
};

fn viewer_rights(view: &PeerView) -> Option<AdminRights> {
    view.peer.as_ref().and_then(Peer::admin_rights)
}

/// Whether the add-member, invite-link and hint rows are shown.
pub fn can_invite_users(view: &PeerView) -> bool {
    viewer_rights(view).is_some_and(|rights| rights.invite_users)
}

pub fn can_ban_users(view: &PeerView) -> bool {
    viewer_rights(view).is_some_and(|rights| rights.ban_users)
}

/// A member row is editable iff it is not the viewer, not the creator, and the
/// viewer may ban users in this channel.
pub fn is_row_editable(viewer: PeerId, participant: &RenderedParticipant, can_ban: bool) -> bool {
    if participant.peer_id() == viewer || participant.participant.is_creator() {
        return false;
    }
    can_ban
}

#[cfg(test)]
mod tests {
    use shared::{
        domain::{ChannelInfo, PeerKind},
        participant::ChannelParticipant,
    };

    use super::*;

    fn view(rights: AdminRights) -> PeerView {
        PeerView::loaded(Peer::channel(PeerId(100), "news", ChannelInfo::Broadcast, rights))
    }

    fn member(id: i64) -> RenderedParticipant {
        RenderedParticipant::new(
            ChannelParticipant::member(PeerId(id), 10),
            Peer::user(PeerId(id), "member"),
        )
    }

    #[test]
    fn unloaded_or_non_channel_views_grant_nothing() {
        let unloaded = PeerView {
            peer_id: PeerId(100),
            peer: None,
        };
        assert!(!can_invite_users(&unloaded));
        assert!(!can_ban_users(&unloaded));

        let group = PeerView::loaded(Peer {
            id: PeerId(100),
            display_title: "legacy".into(),
            kind: PeerKind::Group,
        });
        assert!(!can_invite_users(&group));
    }

    #[test]
    fn rights_map_to_capabilities() {
        let invite_only = view(AdminRights {
            invite_users: true,
            ban_users: false,
        });
        assert!(can_invite_users(&invite_only));
        assert!(!can_ban_users(&invite_only));
    }

    #[test]
    fn viewer_and_creator_rows_are_never_editable() {
        let viewer = PeerId(1);
        let creator = RenderedParticipant::new(
            ChannelParticipant::Creator { peer_id: PeerId(2) },
            Peer::user(PeerId(2), "creator"),
        );
        assert!(!is_row_editable(viewer, &member(1), true));
        assert!(!is_row_editable(viewer, &creator, true));
        assert!(is_row_editable(viewer, &member(3), true));
        assert!(!is_row_editable(viewer, &member(3), false));
    }
}
