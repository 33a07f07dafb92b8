//! Local HTTP API the browser view talks to.
//!
//! Every route goes through the shared [`SessionController`]; handlers only
//! translate between HTTP and controller calls.

use crate::history::{history_view, question_count_label, HistoryItemView};
use crate::i18n::{Language, MetricsReport};
use crate::image::{ImageUpload, MAX_IMAGE_BYTES};
use crate::session::{
    Activity, DiagnosisResult, HistoryEntry, Notification, SessionController, SessionError,
    SessionState, SwitchOutcome,
};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub type AppState = Arc<SessionController>;

/// Multipart framing on top of the largest accepted image.
const BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

pub fn build_router(controller: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/session", get(get_session).delete(reset_session))
        .route("/api/session/image", post(upload_image))
        .route("/api/session/question", post(ask_question))
        .route("/api/session/language", put(switch_language))
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/stream", get(notification_stream))
        .route("/api/notifications/:id/ack", post(acknowledge_notification))
        .route("/api/strings/:language", get(get_strings))
        .route("/api/languages", get(list_languages))
        .route("/api/metrics", get(get_metrics))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}

// ==================== Errors ====================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: ErrorBody {
                    code: self.code.to_string(),
                    message: self.message,
                },
            }),
        )
            .into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::Busy(_) => Self::new(StatusCode::CONFLICT, "busy", message),
            SessionError::NoDiagnosis => Self::bad_request("no_diagnosis", message),
            SessionError::EmptyQuestion => Self::bad_request("empty_question", message),
            SessionError::InvalidImage(_) => Self::bad_request("invalid_image", message),
            SessionError::Diagnosis(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "diagnosis_failed", message)
            }
            SessionError::Question(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "question_failed", message)
            }
            SessionError::TranslationAborted { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "translation_aborted", message)
            }
        }
    }
}

fn parse_language(code: &str) -> Result<Language, ApiError> {
    Language::from_code(code).map_err(|e| ApiError::bad_request("unknown_language", e.to_string()))
}

// ==================== Views ====================

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub language: Language,
    pub activity: Activity,
    pub busy: bool,
    pub result: Option<DiagnosisResult>,
    pub history: Vec<HistoryItemView>,
    pub question_count: usize,
    pub question_count_label: String,
}

impl SessionView {
    fn new(state: &SessionState, activity: Activity) -> Self {
        Self {
            language: state.language,
            activity,
            busy: activity.is_busy(),
            result: state.result.clone(),
            history: history_view(state),
            question_count: state.history.len(),
            question_count_label: question_count_label(state.history.len(), state.language),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    backend: String,
}

#[derive(Debug, Serialize)]
struct LanguageView {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    canonical: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Debug, Serialize)]
struct SwitchResponse {
    changed: bool,
    tasks: usize,
    session: SessionView,
}

// ==================== Handlers ====================

async fn health(State(controller): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        backend: controller.config().api_base_url.clone(),
    })
}

async fn session_view(controller: &SessionController) -> SessionView {
    let state = controller.snapshot().await;
    SessionView::new(&state, controller.activity())
}

async fn get_session(State(controller): State<AppState>) -> Json<SessionView> {
    Json(session_view(&controller).await)
}

async fn reset_session(State(controller): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    controller.reset().await?;
    Ok(Json(session_view(&controller).await))
}

async fn upload_image(
    State(controller): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed multipart upload: {}", e);
        ApiError::bad_request("invalid_multipart", e.body_text())
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request("invalid_multipart", e.body_text()))?;

        upload = Some(ImageUpload::new(file_name, content_type, bytes.to_vec()));
        break;
    }

    let upload = upload.ok_or_else(|| {
        ApiError::bad_request("missing_file", "multipart field 'file' is required")
    })?;

    controller.upload_image(upload).await?;
    Ok(Json(session_view(&controller).await))
}

async fn ask_question(
    State(controller): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let entry = controller.ask_question(&request.question).await?;
    Ok(Json(entry))
}

async fn switch_language(
    State(controller): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<SwitchResponse>, ApiError> {
    let target = parse_language(&request.language)?;

    let (changed, tasks) = match controller.switch_language(target).await {
        Ok(SwitchOutcome::Unchanged) => (false, 0),
        Ok(SwitchOutcome::Switched { tasks, .. }) => (true, tasks),
        Err(e) => {
            error!("Language switch to {} failed: {}", target.code(), e);
            return Err(e.into());
        }
    };

    Ok(Json(SwitchResponse {
        changed,
        tasks,
        session: session_view(&controller).await,
    }))
}

async fn list_notifications(State(controller): State<AppState>) -> Json<Vec<Notification>> {
    Json(controller.notifier().active().await)
}

/// Server-sent events: one `notification` event per toast or alert raised
/// after the client connected.
async fn notification_stream(
    State(controller): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = controller.notifier().subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(notification) => {
                    match Event::default().event("notification").json_data(&notification) {
                        Ok(event) => return Some((Ok::<_, Infallible>(event), receiver)),
                        Err(e) => warn!("Failed to encode notification {}: {}", notification.id, e),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Notification stream lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

async fn acknowledge_notification(
    State(controller): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if controller.notifier().acknowledge(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "unknown_notification",
            format!("no active notification with id {}", id),
        ))
    }
}

async fn get_strings(Path(code): Path<String>) -> Result<Response, ApiError> {
    let language = parse_language(&code)?;
    Ok(Json(language.strings()).into_response())
}

async fn list_languages() -> Json<Vec<LanguageView>> {
    let languages = Language::all()
        .into_iter()
        .map(|language| LanguageView {
            code: language.code(),
            name: language.name(),
            native_name: language.native_name(),
            canonical: language.is_canonical(),
        })
        .collect();
    Json(languages)
}

async fn get_metrics(State(controller): State<AppState>) -> Json<MetricsReport> {
    Json(controller.metrics().report())
}
