//! Add/remove member flows and the host-side collaborators they talk to.

use async_trait::async_trait;
use shared::{
    domain::{ChannelInfo, Peer, PeerId},
    error::MemberActionError,
    participant::{ChannelParticipant, RenderedParticipant},
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::presentation::Strings;

#[async_trait]
pub trait MembershipService: Send + Sync {
    async fn add_member(&self, channel_id: PeerId, member_id: PeerId)
        -> Result<(), MemberActionError>;
    async fn remove_member(
        &self,
        channel_id: PeerId,
        member_id: PeerId,
    ) -> Result<(), MemberActionError>;
}

/// A two-button alert: `confirm_title` proceeds, `cancel_title` dismisses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub text: String,
    pub confirm_title: String,
    pub cancel_title: String,
}

/// Asks the user to confirm adding a member. `false` cancels the flow.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    ContactPicker { title: String },
    InviteLink { channel_id: PeerId },
    PeerInfo { peer: Peer },
}

/// Fire-and-forget presentation of other screens.
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}

/// Confirmation wording depends on the channel kind; anything that is not a
/// broadcast channel uses the group wording.
pub fn add_participant_confirmation_text(
    strings: &Strings,
    channel: Option<&Peer>,
    member: &Peer,
) -> String {
    match channel.and_then(Peer::channel_info) {
        Some(ChannelInfo::Broadcast) => strings.channel_add_confirmation(&member.display_title),
        Some(ChannelInfo::Group) | None => strings.group_add_confirmation(&member.display_title),
    }
}

pub fn add_participant_confirmation(
    strings: &Strings,
    channel: Option<&Peer>,
    member: &Peer,
) -> ConfirmationRequest {
    ConfirmationRequest {
        text: add_participant_confirmation_text(strings, channel, member),
        confirm_title: strings.ok.clone(),
        cancel_title: strings.cancel.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddMemberOutcome {
    Added(RenderedParticipant),
    Declined,
    Failed(MemberActionError),
}

pub struct AddMemberRequest<'a> {
    pub strings: &'a Strings,
    pub channel: Option<&'a Peer>,
    pub channel_id: PeerId,
    pub member: Peer,
    /// Unix seconds used as the optimistic invite time.
    pub now: i64,
}

pub async fn run_add_member(
    service: &dyn MembershipService,
    prompt: &dyn ConfirmationPrompt,
    request: AddMemberRequest<'_>,
) -> AddMemberOutcome {
    let confirmation =
        add_participant_confirmation(request.strings, request.channel, &request.member);
    if !prompt.confirm(&confirmation).await {
        debug!(member_id = request.member.id.0, "add member declined");
        return AddMemberOutcome::Declined;
    }

    match service
        .add_member(request.channel_id, request.member.id)
        .await
    {
        Ok(()) => {
            info!(
                channel_id = request.channel_id.0,
                member_id = request.member.id.0,
                "member added"
            );
            AddMemberOutcome::Added(RenderedParticipant::new(
                ChannelParticipant::member(request.member.id, request.now),
                request.member,
            ))
        }
        Err(err) => {
            warn!(
                channel_id = request.channel_id.0,
                member_id = request.member.id.0,
                error = %err,
                "add member failed"
            );
            AddMemberOutcome::Failed(err)
        }
    }
}

pub async fn run_remove_member(
    service: &dyn MembershipService,
    channel_id: PeerId,
    member_id: PeerId,
) -> Result<(), MemberActionError> {
    match service.remove_member(channel_id, member_id).await {
        Ok(()) => {
            info!(channel_id = channel_id.0, member_id = member_id.0, "member removed");
            Ok(())
        }
        Err(err) => {
            warn!(
                channel_id = channel_id.0,
                member_id = member_id.0,
                error = %err,
                "remove member failed"
            );
            Err(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipCall {
    Add { channel_id: PeerId, member_id: PeerId },
    Remove { channel_id: PeerId, member_id: PeerId },
}

/// Membership service that records calls and optionally fails every request.
#[derive(Default)]
pub struct InMemoryMembershipService {
    fail_with: Option<MemberActionError>,
    calls: Mutex<Vec<MembershipCall>>,
}

impl InMemoryMembershipService {
    pub fn failing(err: MemberActionError) -> Self {
        Self {
            fail_with: Some(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<MembershipCall> {
        self.calls.lock().await.clone()
    }

    fn outcome(&self) -> Result<(), MemberActionError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MembershipService for InMemoryMembershipService {
    async fn add_member(
        &self,
        channel_id: PeerId,
        member_id: PeerId,
    ) -> Result<(), MemberActionError> {
        self.calls.lock().await.push(MembershipCall::Add {
            channel_id,
            member_id,
        });
        self.outcome()
    }

    async fn remove_member(
        &self,
        channel_id: PeerId,
        member_id: PeerId,
    ) -> Result<(), MemberActionError> {
        self.calls.lock().await.push(MembershipCall::Remove {
            channel_id,
            member_id,
        });
        self.outcome()
    }
}

/// Prompt with a fixed answer, for scripted hosts.
pub struct FixedConfirmation(pub bool);

#[async_trait]
impl ConfirmationPrompt for FixedConfirmation {
    async fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        self.0
    }
}

/// Navigator that forwards requests to a channel read by the host.
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<NavigationRequest>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NavigationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, request: NavigationRequest) {
        if self.tx.send(request).is_err() {
            debug!("navigation request dropped; host is gone");
        }
    }
}

#[cfg(test)]
#[path = "tests/flows_tests.rs"]
mod tests;
