use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "day".into(),
        }
    }
}

/// Localized strings used by the members screen. `{name}` in the confirmation
/// templates is replaced with the selected peer's display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    pub members_title: String,
    pub add_members: String,
    pub invite_link: String,
    pub add_members_help: String,
    pub add_participant_title: String,
    pub channel_add_participant_confirmation: String,
    pub group_add_participant_confirmation: String,
    pub edit: String,
    pub done: String,
    pub back: String,
    pub cancel: String,
    pub ok: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            members_title: "Members".into(),
            add_members: "Add Members".into(),
            invite_link: "Invite via Link".into(),
            add_members_help: "Only channel admins can see this list.".into(),
            add_participant_title: "Add Member".into(),
            channel_add_participant_confirmation: "Add {name} to the channel?".into(),
            group_add_participant_confirmation: "Add {name} to the group?".into(),
            edit: "Edit".into(),
            done: "Done".into(),
            back: "Back".into(),
            cancel: "Cancel".into(),
            ok: "OK".into(),
        }
    }
}

impl Strings {
    pub fn channel_add_confirmation(&self, name: &str) -> String {
        self.channel_add_participant_confirmation
            .replace("{name}", name)
    }

    pub fn group_add_confirmation(&self, name: &str) -> String {
        self.group_add_participant_confirmation.replace("{name}", name)
    }
}

/// Theme and strings bundles. Rows compare these by identity, so a new bundle
/// (theme or language switch) re-renders every row.
#[derive(Debug, Clone, Default)]
pub struct PresentationData {
    pub theme: Arc<Theme>,
    pub strings: Arc<Strings>,
}

impl PresentationData {
    pub fn new(theme: Theme, strings: Strings) -> Self {
        Self {
            theme: Arc::new(theme),
            strings: Arc::new(strings),
        }
    }

    pub fn is_same_bundle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.theme, &other.theme) && Arc::ptr_eq(&self.strings, &other.strings)
    }
}
