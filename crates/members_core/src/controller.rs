//! The members screen controller: one task owns every piece of screen state
//! and applies host commands and background results in arrival order.

use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::{Peer, PeerId, PeerView},
    error::MemberActionError,
    participant::RenderedParticipant,
};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{
    config::Settings,
    error::MembersError,
    flows::{
        run_add_member, run_remove_member, AddMemberOutcome, AddMemberRequest,
        ConfirmationPrompt, MembershipService, NavigationRequest, Navigator,
    },
    presentation::PresentationData,
    snapshot::MemberSnapshot,
    source::{LoadMoreHandle, MemberSource},
    state::{ControllerState, StateStore},
    transition::{MembersScreen, ScreenUpdate},
};

pub struct ControllerDependencies {
    pub source: Arc<dyn MemberSource>,
    pub membership: Arc<dyn MembershipService>,
    pub prompt: Arc<dyn ConfirmationPrompt>,
    pub navigator: Arc<dyn Navigator>,
}

pub struct ControllerConfig {
    pub viewer: PeerId,
    pub view: PeerView,
    pub presentation: PresentationData,
    pub settings: Settings,
}

/// Host-side events delivered to the controller.
#[derive(Debug, Clone)]
pub enum MembersCommand {
    SetPresentation(PresentationData),
    SetPeerView(PeerView),
    SetEditing(bool),
    SetRevealedOptions {
        peer_id: Option<PeerId>,
        from_peer_id: Option<PeerId>,
    },
    AddMember,
    MemberSelected(Peer),
    RemoveMember(PeerId),
    OpenPeer(Peer),
    InviteViaLink,
    VisibleBottomOffsetChanged(Option<f64>),
}

enum Message {
    Command(MembersCommand),
    AddFinished {
        generation: u64,
        outcome: AddMemberOutcome,
    },
    RemoveFinished {
        generation: u64,
        peer_id: PeerId,
        result: Result<(), MemberActionError>,
    },
    Shutdown,
}

/// Single-slot handle for one kind of in-flight action. Starting a new action
/// aborts the previous one, and results tagged with an older generation are
/// discarded.
#[derive(Default)]
struct ActionSlot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl ActionSlot {
    fn begin(&mut self) -> u64 {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.generation
    }

    fn attach(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }

    fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.task = None;
        true
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct MembersControllerHandle {
    tx: mpsc::Sender<Message>,
    updates: watch::Receiver<Option<ScreenUpdate>>,
    state: watch::Receiver<ControllerState>,
    task: JoinHandle<()>,
}

impl MembersControllerHandle {
    pub async fn send(&self, command: MembersCommand) -> Result<(), MembersError> {
        self.tx
            .send(Message::Command(command))
            .await
            .map_err(|_| MembersError::ControllerClosed)
    }

    /// Latest screen update; `None` until the first render.
    pub fn updates(&self) -> watch::Receiver<Option<ScreenUpdate>> {
        self.updates.clone()
    }

    pub fn state(&self) -> watch::Receiver<ControllerState> {
        self.state.clone()
    }

    /// Stops the controller and cancels everything it still has in flight.
    pub async fn shutdown(self) -> Result<(), MembersError> {
        // A closed queue means the task already exited; joining still reports panics.
        let _ = self.tx.send(Message::Shutdown).await;
        self.task
            .await
            .map_err(|err| MembersError::TaskFailed(err.to_string()))
    }
}

pub struct MembersController {
    viewer: PeerId,
    view: PeerView,
    presentation: PresentationData,
    load_more_threshold: f64,
    deps: ControllerDependencies,
    state: StateStore<ControllerState>,
    snapshot: MemberSnapshot,
    screen: MembersScreen,
    load_more: Option<LoadMoreHandle>,
    add_slot: ActionSlot,
    remove_slot: ActionSlot,
    load_more_task: Option<JoinHandle<()>>,
    reply: mpsc::WeakSender<Message>,
    updates: watch::Sender<Option<ScreenUpdate>>,
}

impl MembersController {
    pub fn spawn(config: ControllerConfig, deps: ControllerDependencies) -> MembersControllerHandle {
        let (tx, rx) = mpsc::channel(config.settings.command_queue_capacity.max(1));
        let (updates_tx, updates) = watch::channel(None);
        let state = StateStore::new(ControllerState::default());
        let state_rx = state.subscribe();

        let controller = Self {
            viewer: config.viewer,
            view: config.view,
            presentation: config.presentation,
            load_more_threshold: config.settings.load_more_threshold,
            deps,
            state,
            snapshot: MemberSnapshot::default(),
            screen: MembersScreen::new(config.viewer),
            load_more: None,
            add_slot: ActionSlot::default(),
            remove_slot: ActionSlot::default(),
            load_more_task: None,
            reply: tx.downgrade(),
            updates: updates_tx,
        };
        let task = tokio::spawn(controller.run(rx));

        MembersControllerHandle {
            tx,
            updates,
            state: state_rx,
            task,
        }
    }

    fn channel_id(&self) -> PeerId {
        self.view.peer_id
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Message>) {
        let channel_id = self.channel_id();
        let mut snapshots = match self.deps.source.fetch_page(channel_id).await {
            Ok(subscription) => {
                self.load_more = subscription.load_more;
                let mut snapshots = subscription.snapshots;
                let initial = snapshots.borrow_and_update().clone();
                self.snapshot.set_server(initial);
                Some(snapshots)
            }
            Err(err) => {
                warn!(channel_id = channel_id.0, error = %err, "failed to fetch members");
                None
            }
        };
        info!(
            channel_id = channel_id.0,
            viewer = self.viewer.0,
            loaded = self.snapshot.is_loaded(),
            "members controller started"
        );
        self.publish();

        loop {
            let dirty = tokio::select! {
                message = rx.recv() => match message {
                    None | Some(Message::Shutdown) => break,
                    Some(message) => self.handle(message),
                },
                snapshot = next_snapshot(&mut snapshots) => match snapshot {
                    Some(snapshot) => {
                        self.snapshot.set_server(snapshot);
                        true
                    }
                    None => {
                        debug!(channel_id = channel_id.0, "member source closed");
                        snapshots = None;
                        false
                    }
                },
            };
            if dirty {
                self.publish();
            }
        }

        self.teardown();
    }

    fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::Command(command) => self.handle_command(command),
            Message::AddFinished {
                generation,
                outcome,
            } => {
                if !self.add_slot.finish(generation) {
                    debug!(generation, "discarding superseded add result");
                    return false;
                }
                match outcome {
                    AddMemberOutcome::Added(participant) => self.snapshot.apply_added(participant),
                    AddMemberOutcome::Declined | AddMemberOutcome::Failed(_) => false,
                }
            }
            Message::RemoveFinished {
                generation,
                peer_id,
                result,
            } => {
                if !self.remove_slot.finish(generation) {
                    debug!(generation, "discarding superseded remove result");
                    return false;
                }
                let cleared = self
                    .state
                    .update(|state| state.with_updated_removing_peer_id(None));
                let removed = result.is_ok() && self.snapshot.apply_removed(peer_id);
                cleared || removed
            }
            Message::Shutdown => false,
        }
    }

    fn handle_command(&mut self, command: MembersCommand) -> bool {
        match command {
            MembersCommand::SetPresentation(presentation) => {
                if self.presentation.is_same_bundle(&presentation) {
                    return false;
                }
                self.presentation = presentation;
                true
            }
            MembersCommand::SetPeerView(view) => {
                if view == self.view {
                    return false;
                }
                self.view = view;
                true
            }
            MembersCommand::SetEditing(editing) => self
                .state
                .update(|state| state.with_updated_editing(editing)),
            MembersCommand::SetRevealedOptions {
                peer_id,
                from_peer_id,
            } => self
                .state
                .update(|state| state.with_revealed_options_request(peer_id, from_peer_id)),
            MembersCommand::AddMember => {
                self.deps.navigator.navigate(NavigationRequest::ContactPicker {
                    title: self.presentation.strings.add_participant_title.clone(),
                });
                false
            }
            MembersCommand::MemberSelected(peer) => {
                self.start_add(peer);
                false
            }
            MembersCommand::RemoveMember(peer_id) => self.start_remove(peer_id),
            MembersCommand::OpenPeer(peer) => {
                self.deps
                    .navigator
                    .navigate(NavigationRequest::PeerInfo { peer });
                false
            }
            MembersCommand::InviteViaLink => {
                self.deps.navigator.navigate(NavigationRequest::InviteLink {
                    channel_id: self.channel_id(),
                });
                false
            }
            MembersCommand::VisibleBottomOffsetChanged(offset) => {
                if offset.is_some_and(|offset| offset < self.load_more_threshold) {
                    self.request_load_more();
                }
                false
            }
        }
    }

    fn start_add(&mut self, member: Peer) {
        let generation = self.add_slot.begin();
        let service = Arc::clone(&self.deps.membership);
        let prompt = Arc::clone(&self.deps.prompt);
        let strings = Arc::clone(&self.presentation.strings);
        let channel = self.view.peer.clone();
        let channel_id = self.channel_id();
        let reply = self.reply.clone();
        let now = Utc::now().timestamp();

        let task = tokio::spawn(async move {
            let outcome = run_add_member(
                service.as_ref(),
                prompt.as_ref(),
                AddMemberRequest {
                    strings: &strings,
                    channel: channel.as_ref(),
                    channel_id,
                    member,
                    now,
                },
            )
            .await;
            if let Some(tx) = reply.upgrade() {
                let _ = tx.send(Message::AddFinished { generation, outcome }).await;
            }
        });
        self.add_slot.attach(task);
    }

    fn start_remove(&mut self, peer_id: PeerId) -> bool {
        let marked = self
            .state
            .update(|state| state.with_updated_removing_peer_id(Some(peer_id)));
        let generation = self.remove_slot.begin();
        let service = Arc::clone(&self.deps.membership);
        let channel_id = self.channel_id();
        let reply = self.reply.clone();

        let task = tokio::spawn(async move {
            let result = run_remove_member(service.as_ref(), channel_id, peer_id).await;
            if let Some(tx) = reply.upgrade() {
                let _ = tx
                    .send(Message::RemoveFinished {
                        generation,
                        peer_id,
                        result,
                    })
                    .await;
            }
        });
        self.remove_slot.attach(task);
        marked
    }

    fn request_load_more(&mut self) {
        let Some(handle) = self.load_more.clone() else {
            return;
        };
        if self
            .load_more_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
        {
            return;
        }
        let source = Arc::clone(&self.deps.source);
        let channel_id = self.channel_id();
        self.load_more_task = Some(tokio::spawn(async move {
            if let Err(err) = source.load_more(channel_id, &handle).await {
                warn!(channel_id = channel_id.0, error = %err, "failed to load more members");
            }
        }));
    }

    fn publish(&mut self) {
        let state = self.state.get();
        let participants = self.snapshot.rendered();
        match self
            .screen
            .render(&self.presentation, &self.view, &state, participants.as_deref())
        {
            Ok(update) => {
                self.updates.send_replace(Some(update));
            }
            Err(err) => error!(error = %err, "failed to reconcile members list"),
        }
    }

    fn teardown(&mut self) {
        self.add_slot.cancel();
        self.remove_slot.cancel();
        if let Some(task) = self.load_more_task.take() {
            task.abort();
        }
        info!(channel_id = self.channel_id().0, "members controller stopped");
    }
}

/// Next snapshot from the source, `None` once it closes. Pending forever when
/// there is no subscription.
async fn next_snapshot(
    snapshots: &mut Option<watch::Receiver<Option<Vec<RenderedParticipant>>>>,
) -> Option<Option<Vec<RenderedParticipant>>> {
    let Some(receiver) = snapshots.as_mut() else {
        return std::future::pending().await;
    };
    match receiver.changed().await {
        Ok(()) => Some(receiver.borrow_and_update().clone()),
        Err(_) => None,
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
