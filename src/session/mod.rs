//! The assistant session: one diagnosis, its question history, and the
//! language everything is shown in.
//!
//! # Architecture
//!
//! - `model`: Diagnosis result and history entries
//! - `state`: The session snapshot views render, plus the busy indicator
//! - `coordinator`: All-or-nothing language switch (gather, then commit or roll back)
//! - `notify`: Toasts and alerts raised by the flows
//! - `controller`: Sole writer of the session, running upload, ask and switch

mod controller;
mod coordinator;
mod model;
mod notify;
mod state;

pub use controller::{SessionController, SwitchOutcome};
pub use coordinator::{
    plan_tasks, Gathered, LanguageSwitch, TaskFailure, TaskPayload, TaskTarget, TranslationTask,
};
pub use model::{DiagnosisResult, HistoryEntry};
pub use notify::{Level, Notification, NotificationKind, Notifier};
pub use state::{Activity, SessionState};

use crate::backend::BackendError;
use crate::image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is busy {0}")]
    Busy(Activity),

    #[error("no diagnosis yet; upload an image first")]
    NoDiagnosis,

    #[error("question is empty")]
    EmptyQuestion,

    #[error(transparent)]
    InvalidImage(#[from] ImageError),

    #[error("diagnosis failed: {0}")]
    Diagnosis(#[source] BackendError),

    #[error("question failed: {0}")]
    Question(#[source] BackendError),

    #[error("{failed} out of {total} translations failed. Translation aborted.")]
    TranslationAborted { failed: usize, total: usize },
}
