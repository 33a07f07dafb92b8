//! Language switching as a two-phase transaction.
//!
//! Phase one snapshots the session, plans one translation task per piece of
//! visible content and runs them all concurrently until every task has
//! settled. Nothing visible changes during this phase. Phase two either
//! commits a fully translated copy of the session or restores the snapshot;
//! the controller performs it under a single write lock.

use crate::backend::BackendError;
use crate::config::Config;
use crate::i18n::Language;
use crate::session::{DiagnosisResult, HistoryEntry, SessionState};
use crate::translation::{translate_result, translate_text};
use futures::future::join_all;
use tracing::{info, warn};

/// Where a translated value goes once every task has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTarget {
    Result,
    Question(usize),
    Answer(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPayload {
    Result(DiagnosisResult),
    Text(String),
}

/// One independent translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTask {
    pub target: TaskTarget,
    pub payload: TaskPayload,
}

#[derive(Debug)]
enum Translated {
    Result(DiagnosisResult),
    Text(String),
}

/// Plan the translation tasks for the visible session content.
///
/// The diagnosis becomes a single task; each question and answer becomes its
/// own task unless it is blank, in which case it is left untouched.
pub fn plan_tasks(result: Option<&DiagnosisResult>, history: &[HistoryEntry]) -> Vec<TranslationTask> {
    let mut tasks = Vec::with_capacity(1 + history.len() * 2);

    if let Some(result) = result {
        tasks.push(TranslationTask {
            target: TaskTarget::Result,
            payload: TaskPayload::Result(result.clone()),
        });
    }

    for (index, entry) in history.iter().enumerate() {
        if !entry.question.trim().is_empty() {
            tasks.push(TranslationTask {
                target: TaskTarget::Question(index),
                payload: TaskPayload::Text(entry.question.clone()),
            });
        }
        if !entry.answer.trim().is_empty() {
            tasks.push(TranslationTask {
                target: TaskTarget::Answer(index),
                payload: TaskPayload::Text(entry.answer.clone()),
            });
        }
    }

    tasks
}

/// A failed task, kept for logging.
#[derive(Debug)]
pub struct TaskFailure {
    pub target: TaskTarget,
    pub error: BackendError,
}

/// Outcome of phase one.
#[derive(Debug)]
pub enum Gathered {
    /// Every task succeeded; this is the fully translated session.
    Complete(SessionState),
    /// At least one task failed; nothing may be applied.
    Failed {
        failures: Vec<TaskFailure>,
        total: usize,
    },
}

/// An in-flight switch from the snapshot's language to `target`.
#[derive(Debug)]
pub struct LanguageSwitch {
    snapshot: SessionState,
    target: Language,
    tasks: Vec<TranslationTask>,
}

impl LanguageSwitch {
    /// Start a switch, or `None` when `target` is already active.
    pub fn prepare(current: &SessionState, target: Language) -> Option<Self> {
        if current.language == target {
            return None;
        }

        Some(Self {
            snapshot: current.clone(),
            target,
            tasks: plan_tasks(current.result.as_ref(), &current.history),
        })
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn snapshot(&self) -> &SessionState {
        &self.snapshot
    }

    pub fn tasks(&self) -> &[TranslationTask] {
        &self.tasks
    }

    /// Phase one: run every task concurrently and wait for all of them.
    ///
    /// One task failing never cancels the others; results are matched back
    /// to their task by position, so completion order is irrelevant.
    pub async fn gather(&self, client: &reqwest::Client, config: &Config) -> Gathered {
        info!(
            "Translating session from {} to {}: {} tasks",
            self.snapshot.language.code(),
            self.target.code(),
            self.tasks.len()
        );

        let outcomes = join_all(
            self.tasks
                .iter()
                .map(|task| run_task(client, config, task, self.target)),
        )
        .await;

        let total = outcomes.len();
        let mut translated = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (task, outcome) in self.tasks.iter().zip(outcomes) {
            match outcome {
                Ok(value) => translated.push((task.target, value)),
                Err(error) => {
                    warn!(
                        "Translation task {:?} failed at {}: {}",
                        task.target,
                        error.endpoint(),
                        error
                    );
                    failures.push(TaskFailure {
                        target: task.target,
                        error,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Gathered::Failed { failures, total };
        }

        Gathered::Complete(self.apply(translated))
    }

    /// Build the translated copy of the snapshot.
    fn apply(&self, translated: Vec<(TaskTarget, Translated)>) -> SessionState {
        let mut next = self.snapshot.clone();
        next.language = self.target;

        for (target, value) in translated {
            match (target, value) {
                (TaskTarget::Result, Translated::Result(result)) => next.result = Some(result),
                (TaskTarget::Question(index), Translated::Text(text)) => {
                    if let Some(entry) = next.history.get_mut(index) {
                        entry.question = text;
                    }
                }
                (TaskTarget::Answer(index), Translated::Text(text)) => {
                    if let Some(entry) = next.history.get_mut(index) {
                        entry.answer = text;
                    }
                }
                (target, _) => warn!("Mismatched translation for {:?} ignored", target),
            }
        }

        next
    }
}

async fn run_task(
    client: &reqwest::Client,
    config: &Config,
    task: &TranslationTask,
    target: Language,
) -> Result<Translated, BackendError> {
    match &task.payload {
        TaskPayload::Result(result) => translate_result(client, config, result, target)
            .await
            .map(Translated::Result),
        TaskPayload::Text(text) => translate_text(client, config, text, target)
            .await
            .map(Translated::Text),
    }
}
