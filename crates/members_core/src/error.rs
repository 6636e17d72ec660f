use thiserror::Error;

use crate::reconcile::ReconcileError;

#[derive(Debug, Error)]
pub enum MembersError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("members controller is no longer running")]
    ControllerClosed,
    #[error("members controller task failed: {0}")]
    TaskFailed(String),
}
