//! Client for the diagnosis and question-answering endpoints.
//!
//! Every endpoint takes `multipart/form-data`, the same shape the browser
//! client posts. Non-2xx responses surface as `BackendError::Status` with the
//! response body attached; nothing is retried.

use crate::config::Config;
use crate::i18n::Language;
use crate::image::ImageUpload;
use crate::session::DiagnosisResult;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const DIAGNOSE_PATH: &str = "/diagnose/";
pub const UPLOAD_IMAGE_PATH: &str = "/upload-image/";
pub const ASK_PATH: &str = "/ask/";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to send request to {endpoint}: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend error from {endpoint} ({status}): {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl BackendError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            BackendError::Transport { endpoint, .. }
            | BackendError::Status { endpoint, .. }
            | BackendError::Decode { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status returned by the backend, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: String,
}

/// POST a form to `endpoint` and decode the JSON body.
pub(crate) async fn post_form<T: DeserializeOwned>(
    client: &reqwest::Client,
    config: &Config,
    endpoint: &'static str,
    form: Form,
) -> Result<T, BackendError> {
    let response = client
        .post(config.endpoint(endpoint))
        .multipart(form)
        .send()
        .await
        .map_err(|source| BackendError::Transport { endpoint, source })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(BackendError::Status {
            endpoint,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| BackendError::Decode { endpoint, source })
}

fn image_form(
    image: &ImageUpload,
    language: Language,
    endpoint: &'static str,
) -> Result<Form, BackendError> {
    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|source| BackendError::Transport { endpoint, source })?;

    Ok(Form::new()
        .part("file", part)
        .text("language", language.code()))
}

/// Diagnose an image, falling back to the basic upload endpoint when the
/// richer `/diagnose/` endpoint is unavailable.
pub async fn diagnose_image(
    client: &reqwest::Client,
    config: &Config,
    image: &ImageUpload,
    language: Language,
) -> Result<DiagnosisResult, BackendError> {
    let form = image_form(image, language, DIAGNOSE_PATH)?;
    match post_form(client, config, DIAGNOSE_PATH, form).await {
        Ok(result) => Ok(result),
        Err(e) => {
            warn!("{} failed ({}), falling back to {}", DIAGNOSE_PATH, e, UPLOAD_IMAGE_PATH);
            let form = image_form(image, language, UPLOAD_IMAGE_PATH)?;
            post_form(client, config, UPLOAD_IMAGE_PATH, form).await
        }
    }
}

/// Ask a follow-up question, optionally grounded in the current diagnosis.
pub async fn ask_question(
    client: &reqwest::Client,
    config: &Config,
    question: &str,
    language: Language,
    context: Option<&str>,
) -> Result<String, BackendError> {
    let mut form = Form::new()
        .text("question", question.to_string())
        .text("language", language.code());
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        form = form.text("context", context.to_string());
    }

    debug!("Asking question in {} ({} chars)", language.code(), question.len());
    let response: AskResponse = post_form(client, config, ASK_PATH, form).await?;
    Ok(response.answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ASCII stand-in for the pixels: wiremock's string matchers skip bodies
    // that are not valid UTF-8.
    fn leaf_image() -> ImageUpload {
        ImageUpload::new("leaf.jpg", "image/jpeg", b"leaf-pixels".to_vec())
    }

    fn diagnosis_json() -> serde_json::Value {
        serde_json::json!({
            "caption": "A tomato leaf with dark spots",
            "crop": "Tomato",
            "disease": "Early blight"
        })
    }

    // ==================== Diagnose Tests ====================

    #[tokio::test]
    async fn test_diagnose_uses_diagnose_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/diagnose/"))
            .and(body_string_contains("name=\"language\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(diagnosis_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/upload-image/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(diagnosis_json()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = diagnose_image(&client, &config, &leaf_image(), Language::ENGLISH)
            .await
            .expect("Should succeed");

        assert_eq!(result.crop, "Tomato");
        assert_eq!(result.disease, "Early blight");
    }

    #[tokio::test]
    async fn test_diagnose_falls_back_to_upload_image() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/diagnose/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/upload-image/"))
            .and(body_string_contains("name=\"language\""))
            .and(body_string_contains("\r\nbn\r\n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(diagnosis_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = diagnose_image(&client, &config, &leaf_image(), Language::BENGALI)
            .await
            .expect("Fallback should succeed");

        assert_eq!(result.caption, "A tomato leaf with dark spots");
    }

    #[tokio::test]
    async fn test_diagnose_reports_fallback_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/diagnose/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/upload-image/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("File must be an image"))
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let err = diagnose_image(&client, &config, &leaf_image(), Language::ENGLISH)
            .await
            .unwrap_err();

        assert_eq!(err.endpoint(), "/upload-image/");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.to_string().contains("File must be an image"));
    }

    // ==================== Ask Tests ====================

    #[tokio::test]
    async fn test_ask_question_sends_context() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask/"))
            .and(body_string_contains("How do I treat it?"))
            .and(body_string_contains("Crop: Tomato"))
            .and(body_string_contains("name=\"context\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"answer": "Remove affected leaves."})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let answer = ask_question(
            &client,
            &config,
            "How do I treat it?",
            Language::ENGLISH,
            Some("Crop: Tomato"),
        )
        .await
        .expect("Should succeed");

        assert_eq!(answer, "Remove affected leaves.");
    }

    #[tokio::test]
    async fn test_ask_question_omits_empty_context() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "ok"})),
            )
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        ask_question(&client, &config, "Anything?", Language::ENGLISH, Some(""))
            .await
            .expect("Should succeed");

        let requests = mock_server.received_requests().await.expect("recording on");
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("name=\"context\""));
    }

    #[tokio::test]
    async fn test_ask_question_no_retry_on_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Failed to get answer"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let err = ask_question(&client, &config, "Why?", Language::ENGLISH, None)
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Status { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_ask_question_malformed_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let err = ask_question(&client, &config, "Why?", Language::ENGLISH, None)
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Decode { endpoint: "/ask/", .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let config = Config::for_backend("http://127.0.0.1:1");
        let client = reqwest::Client::new();

        let err = ask_question(&client, &config, "Hello?", Language::ENGLISH, None)
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
