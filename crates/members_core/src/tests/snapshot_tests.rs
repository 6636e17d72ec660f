use super::*;
use shared::{domain::Peer, participant::ChannelParticipant};

fn creator(id: i64) -> RenderedParticipant {
    RenderedParticipant::new(
        ChannelParticipant::Creator {
            peer_id: PeerId(id),
        },
        Peer::user(PeerId(id), format!("user-{id}")),
    )
}

fn member(id: i64, invited_at: i64) -> RenderedParticipant {
    RenderedParticipant::new(
        ChannelParticipant::member(PeerId(id), invited_at),
        Peer::user(PeerId(id), format!("user-{id}")),
    )
}

fn ids(participants: &[RenderedParticipant]) -> Vec<i64> {
    participants.iter().map(|p| p.peer_id().0).collect()
}

fn loaded(participants: Vec<RenderedParticipant>) -> MemberSnapshot {
    let mut snapshot = MemberSnapshot::default();
    snapshot.set_server(Some(participants));
    snapshot
}

#[test]
fn sorts_creator_first_then_by_invite_time() {
    let participants = vec![creator(1), member(2, 50), member(3, 10)];
    let sorted: Vec<i64> = sort_participants(&participants)
        .into_iter()
        .map(|p| p.peer_id().0)
        .collect();
    assert_eq!(sorted, vec![1, 3, 2]);
}

#[test]
fn equal_invite_times_keep_snapshot_order() {
    let participants = vec![member(7, 10), member(5, 10), member(6, 10)];
    let sorted: Vec<i64> = sort_participants(&participants)
        .into_iter()
        .map(|p| p.peer_id().0)
        .collect();
    assert_eq!(sorted, vec![7, 5, 6]);
}

#[test]
fn unknown_server_list_renders_nothing() {
    let snapshot = MemberSnapshot::default();
    assert!(!snapshot.is_loaded());
    assert_eq!(snapshot.rendered(), None);
}

#[test]
fn adding_present_member_is_a_noop() {
    let mut snapshot = loaded(vec![creator(1), member(2, 5)]);
    let before = snapshot.clone();
    assert!(!snapshot.apply_added(member(2, 999)));
    assert_eq!(snapshot, before);
}

#[test]
fn added_member_is_appended() {
    let mut snapshot = loaded(vec![creator(1)]);
    assert!(snapshot.apply_added(member(8, 100)));
    assert_eq!(ids(&snapshot.rendered().expect("loaded")), vec![1, 8]);
}

#[test]
fn add_before_load_waits_for_first_snapshot() {
    let mut snapshot = MemberSnapshot::default();
    assert!(snapshot.apply_added(member(8, 100)));
    assert!(!snapshot.apply_added(member(8, 100)));
    assert_eq!(snapshot.rendered(), None);

    snapshot.set_server(Some(vec![creator(1)]));
    assert_eq!(ids(&snapshot.rendered().expect("loaded")), vec![1, 8]);
}

#[test]
fn removing_absent_member_is_a_noop() {
    let mut snapshot = loaded(vec![creator(1)]);
    let before = snapshot.clone();
    assert!(!snapshot.apply_removed(PeerId(42)));
    assert_eq!(snapshot, before);
}

#[test]
fn removal_hides_member_until_server_drops_it() {
    let mut snapshot = loaded(vec![creator(1), member(2, 5)]);
    assert!(snapshot.apply_removed(PeerId(2)));
    assert_eq!(ids(&snapshot.rendered().expect("loaded")), vec![1]);

    // A stale server snapshot still lists the member.
    snapshot.set_server(Some(vec![creator(1), member(2, 5)]));
    assert_eq!(ids(&snapshot.rendered().expect("loaded")), vec![1]);

    snapshot.set_server(Some(vec![creator(1)]));
    snapshot.set_server(Some(vec![creator(1), member(2, 5)]));
    assert_eq!(ids(&snapshot.rendered().expect("loaded")), vec![1, 2]);
}

#[test]
fn server_confirmation_prunes_pending_add() {
    let mut snapshot = loaded(vec![creator(1)]);
    snapshot.apply_added(member(8, 100));
    snapshot.set_server(Some(vec![creator(1), member(8, 90)]));
    snapshot.set_server(Some(vec![creator(1)]));
    assert_eq!(ids(&snapshot.rendered().expect("loaded")), vec![1]);
}

#[test]
fn duplicate_server_rows_render_once() {
    let snapshot = loaded(vec![creator(1), member(2, 5), member(2, 6)]);
    let rendered = snapshot.rendered().expect("loaded");
    assert_eq!(ids(&rendered), vec![1, 2]);
    assert_eq!(rendered[1].participant.invited_at_sort_key(), 5);
}

#[test]
fn readding_removed_member_restores_it() {
    let mut snapshot = loaded(vec![creator(1), member(2, 5)]);
    snapshot.apply_removed(PeerId(2));
    assert!(snapshot.apply_added(member(2, 50)));
    assert!(snapshot.contains(PeerId(2)));
}
