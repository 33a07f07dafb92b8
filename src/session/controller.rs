use crate::backend::{ask_question, diagnose_image};
use crate::config::Config;
use crate::i18n::{Language, TranslationMetrics};
use crate::image::ImageUpload;
use crate::session::coordinator::{Gathered, LanguageSwitch};
use crate::session::notify::{Level, Notifier};
use crate::session::{Activity, DiagnosisResult, HistoryEntry, SessionError, SessionState};
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Result of a language switch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested language was already active; nothing was sent.
    Unchanged,
    /// Every translation succeeded and the session now uses `language`.
    Switched { language: Language, tasks: usize },
}

/// Sole owner and writer of the session state.
///
/// Views read cloned snapshots; the three flows (upload, ask, switch) are
/// the only writers and at most one of them runs at a time.
pub struct SessionController {
    client: reqwest::Client,
    config: Config,
    state: RwLock<SessionState>,
    activity: AtomicU8,
    notifier: Notifier,
    metrics: TranslationMetrics,
}

/// Holds the activity slot for the duration of a flow.
struct ActivityGuard<'a> {
    slot: &'a AtomicU8,
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        self.slot.store(Activity::Idle.as_u8(), Ordering::Release);
    }
}

impl SessionController {
    pub fn new(config: Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        let notifier = Notifier::new(config.toast_duration);
        Self {
            client,
            config,
            state: RwLock::new(SessionState::new(Language::canonical())),
            activity: AtomicU8::new(Activity::Idle.as_u8()),
            notifier,
            metrics: TranslationMetrics::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    pub fn activity(&self) -> Activity {
        Activity::from_u8(self.activity.load(Ordering::Acquire))
    }

    /// A consistent copy of the session as it is right now.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    fn begin(&self, activity: Activity) -> Result<ActivityGuard<'_>, SessionError> {
        self.activity
            .compare_exchange(
                Activity::Idle.as_u8(),
                activity.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|current| SessionError::Busy(Activity::from_u8(current)))?;

        Ok(ActivityGuard {
            slot: &self.activity,
        })
    }

    async fn current_language(&self) -> Language {
        self.state.read().await.language
    }

    // ==================== Upload & Diagnosis ====================

    /// Diagnose a new image. On success the result replaces the previous one
    /// and the question history is cleared.
    pub async fn upload_image(&self, image: ImageUpload) -> Result<DiagnosisResult, SessionError> {
        let _guard = self.begin(Activity::Diagnosing)?;
        let language = self.current_language().await;

        if let Err(e) = image.validate() {
            warn!("Rejected upload {}: {}", image.file_name, e);
            let message = language
                .strings()
                .invalid_image
                .replace("{reason}", &e.to_string());
            self.notifier.alert(message).await;
            return Err(e.into());
        }

        info!(
            "Diagnosing {} ({} bytes) in {}",
            image.file_name,
            image.bytes.len(),
            language.code()
        );

        match diagnose_image(&self.client, &self.config, &image, language).await {
            Ok(result) => {
                let mut state = self.state.write().await;
                state.result = Some(result.clone());
                state.history.clear();
                info!("Diagnosis complete: crop={}, disease={}", result.crop, result.disease);
                Ok(result)
            }
            Err(e) => {
                error!("Diagnosis failed: {}", e);
                self.notifier.alert(language.strings().upload_failed).await;
                Err(SessionError::Diagnosis(e))
            }
        }
    }

    /// Drop the current result and history, ready for a new image.
    pub async fn reset(&self) -> Result<(), SessionError> {
        let _guard = self.begin(Activity::Diagnosing)?;
        let mut state = self.state.write().await;
        state.result = None;
        state.history.clear();
        info!("Session reset");
        Ok(())
    }

    // ==================== Question & Answer ====================

    /// Ask a follow-up question about the current diagnosis and record the
    /// exchange in history.
    pub async fn ask_question(&self, question: &str) -> Result<HistoryEntry, SessionError> {
        if question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        let _guard = self.begin(Activity::Answering)?;
        let (language, context) = {
            let state = self.state.read().await;
            let result = state.result.as_ref().ok_or(SessionError::NoDiagnosis)?;
            (state.language, result.context_summary())
        };

        match ask_question(&self.client, &self.config, question, language, Some(&context)).await {
            Ok(answer) => {
                let entry = HistoryEntry::new(question, answer);
                let mut state = self.state.write().await;
                state.history.push(entry.clone());
                info!("Answered question; history now has {} entries", state.history.len());
                Ok(entry)
            }
            Err(e) => {
                error!("Question failed: {}", e);
                self.notifier.alert(language.strings().question_failed).await;
                Err(SessionError::Question(e))
            }
        }
    }

    // ==================== Language Switch ====================

    /// Move the whole session to `target`, all or nothing.
    ///
    /// Either every visible string is translated and the language changes in
    /// one write, or the session is left exactly as it was and the returned
    /// error reports how many translations failed.
    pub async fn switch_language(&self, target: Language) -> Result<SwitchOutcome, SessionError> {
        if self.current_language().await == target {
            return Ok(SwitchOutcome::Unchanged);
        }

        let _guard = self.begin(Activity::Translating)?;
        let switch = {
            let state = self.state.read().await;
            match LanguageSwitch::prepare(&state, target) {
                Some(switch) => switch,
                None => return Ok(SwitchOutcome::Unchanged),
            }
        };

        let total = switch.tasks().len();
        self.metrics.record_switch_attempt(total);

        match switch.gather(&self.client, &self.config).await {
            Gathered::Complete(next) => {
                let language = switch.target();
                *self.state.write().await = next;
                self.metrics.record_commit();
                info!("Switched session to {} ({} translations)", language.code(), total);
                self.notifier
                    .toast(Level::Success, language.strings().translation_success)
                    .await;
                Ok(SwitchOutcome::Switched {
                    language,
                    tasks: total,
                })
            }
            Gathered::Failed { failures, total } => {
                let failed = failures.len();
                let original = switch.snapshot().clone();
                let original_language = original.language;
                *self.state.write().await = original;
                self.metrics.record_rollback(failed);
                warn!(
                    "{} out of {} translations failed; session kept in {}",
                    failed,
                    total,
                    original_language.code()
                );

                let message = original_language
                    .strings()
                    .translation_failure
                    .replace("{failed}", &failed.to_string())
                    .replace("{total}", &total.to_string());
                self.notifier.toast(Level::Error, message).await;

                Err(SessionError::TranslationAborted { failed, total })
            }
        }
    }
}
