pub mod config;
pub mod controller;
pub mod entries;
pub mod error;
pub mod flows;
pub mod permissions;
pub mod presentation;
pub mod reconcile;
pub mod snapshot;
pub mod source;
pub mod state;
pub mod transition;

pub use controller::{
    ControllerConfig, ControllerDependencies, MembersCommand, MembersController,
    MembersControllerHandle,
};
pub use entries::{channel_members_entries, Entry, StableId};
pub use error::MembersError;
pub use reconcile::{apply, reconcile, ListEntry, Operation, ReconcileError};
pub use transition::{MembersScreen, ScreenUpdate};
