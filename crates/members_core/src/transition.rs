use serde::Serialize;
use shared::{
    domain::{PeerId, PeerView},
    participant::RenderedParticipant,
};
use tracing::debug;

use crate::{
    entries::{channel_members_entries, Entry},
    presentation::PresentationData,
    reconcile::{reconcile, Operation, ReconcileError},
    state::ControllerState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    Loading,
}

/// Animate only shrink or edit transitions between two known lists; growth
/// (pagination) and the first load are applied without animation.
pub fn should_animate(previous_count: Option<usize>, next_count: Option<usize>) -> bool {
    matches!((previous_count, next_count), (Some(previous), Some(next)) if previous >= next)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    Edit,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationButton {
    pub action: NavigationAction,
    pub title: String,
    pub bold: bool,
}

/// The edit toggle is offered only once members are known and non-empty.
pub fn navigation_button(
    presentation: &PresentationData,
    state: &ControllerState,
    participants: Option<&[RenderedParticipant]>,
) -> Option<NavigationButton> {
    let participants = participants?;
    if participants.is_empty() {
        return None;
    }
    let strings = &presentation.strings;
    Some(if state.editing {
        NavigationButton {
            action: NavigationAction::Done,
            title: strings.done.clone(),
            bold: true,
        }
    } else {
        NavigationButton {
            action: NavigationAction::Edit,
            title: strings.edit.clone(),
            bold: false,
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListTransition {
    pub entries: Vec<Entry>,
    pub operations: Vec<Operation<Entry>>,
    pub animate: bool,
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenUpdate {
    pub title: String,
    pub back_title: String,
    pub navigation_button: Option<NavigationButton>,
    pub list: ListTransition,
}

/// Holds what the list widget currently shows and turns each combined input
/// update into the next [`ScreenUpdate`].
#[derive(Debug)]
pub struct MembersScreen {
    viewer: PeerId,
    previous_entries: Vec<Entry>,
    previous_count: Option<usize>,
}

impl MembersScreen {
    pub fn new(viewer: PeerId) -> Self {
        Self {
            viewer,
            previous_entries: Vec::new(),
            previous_count: None,
        }
    }

    pub fn render(
        &mut self,
        presentation: &PresentationData,
        view: &PeerView,
        state: &ControllerState,
        participants: Option<&[RenderedParticipant]>,
    ) -> Result<ScreenUpdate, ReconcileError> {
        let list = match participants {
            None => {
                // Unknown list: show a placeholder and diff the next load from empty.
                self.previous_entries.clear();
                self.previous_count = None;
                ListTransition {
                    entries: Vec::new(),
                    operations: Vec::new(),
                    animate: false,
                    empty_state: Some(EmptyState::Loading),
                }
            }
            Some(known) => {
                let entries =
                    channel_members_entries(self.viewer, presentation, view, state, Some(known));
                let operations = reconcile(&self.previous_entries, &entries)?;
                let animate = should_animate(self.previous_count, Some(known.len()));
                debug!(
                    rows = entries.len(),
                    operations = operations.len(),
                    animate,
                    "members list reconciled"
                );
                self.previous_entries = entries.clone();
                self.previous_count = Some(known.len());
                ListTransition {
                    entries,
                    operations,
                    animate,
                    empty_state: None,
                }
            }
        };

        Ok(ScreenUpdate {
            title: presentation.strings.members_title.clone(),
            back_title: presentation.strings.back.clone(),
            navigation_button: navigation_button(presentation, state, participants),
            list,
        })
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
