use crate::backend::{post_form, BackendError};
use crate::config::Config;
use crate::i18n::Language;
use crate::session::DiagnosisResult;
use reqwest::multipart::Form;
use serde::Deserialize;
use tracing::debug;

pub const TRANSLATE_PATH: &str = "/translate/";
pub const TRANSLATE_RESULT_PATH: &str = "/translate-result/";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

/// Translate a single piece of text (a question or an answer).
///
/// Returns the translated text on success. The caller decides what a failure
/// means; a language switch treats it as one failed task out of many.
pub async fn translate_text(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    target_language: Language,
) -> Result<String, BackendError> {
    let form = Form::new()
        .text("text", text.to_string())
        .text("target_language", target_language.code());

    debug!(
        "Translating {} chars to {}",
        text.len(),
        target_language.code()
    );
    let response: TranslateResponse = post_form(client, config, TRANSLATE_PATH, form).await?;
    Ok(response.translated_text)
}

/// Translate all three fields of a diagnosis in one request.
pub async fn translate_result(
    client: &reqwest::Client,
    config: &Config,
    result: &DiagnosisResult,
    target_language: Language,
) -> Result<DiagnosisResult, BackendError> {
    let form = Form::new()
        .text("caption", result.caption.clone())
        .text("crop", result.crop.clone())
        .text("disease", result.disease.clone())
        .text("target_language", target_language.code());

    debug!("Translating diagnosis result to {}", target_language.code());
    post_form(client, config, TRANSLATE_RESULT_PATH, form).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Text Translation Tests ====================

    #[tokio::test]
    async fn test_translate_text_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate/"))
            .and(body_string_contains("Is it safe to eat?"))
            .and(body_string_contains("name=\"target_language\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translated_text": "এটা কি খাওয়া নিরাপদ?"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let translated = translate_text(&client, &config, "Is it safe to eat?", Language::BENGALI)
            .await
            .expect("Should succeed");

        assert_eq!(translated, "এটা কি খাওয়া নিরাপদ?");
    }

    #[tokio::test]
    async fn test_translate_text_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Translation failed"))
            .expect(1) // never retried
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = translate_text(&client, &config, "Yes.", Language::BENGALI).await;

        let err = result.unwrap_err();
        assert_eq!(err.endpoint(), "/translate/");
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_translate_text_missing_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "x"})))
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = translate_text(&client, &config, "Yes.", Language::BENGALI).await;
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    // ==================== Result Translation Tests ====================

    #[tokio::test]
    async fn test_translate_result_sends_all_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate-result/"))
            .and(body_string_contains("Healthy leaf"))
            .and(body_string_contains("Tomato"))
            .and(body_string_contains("name=\"disease\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "caption": "সুস্থ পাতা",
                "crop": "টমেটো",
                "disease": "নেই"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let original = DiagnosisResult::new("Healthy leaf", "Tomato", "None");
        let translated = translate_result(&client, &config, &original, Language::BENGALI)
            .await
            .expect("Should succeed");

        assert_eq!(translated, DiagnosisResult::new("সুস্থ পাতা", "টমেটো", "নেই"));
    }

    #[tokio::test]
    async fn test_translate_result_unsupported_language_rejected_by_backend() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate-result/"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("Supported languages: en, bn"),
            )
            .mount(&mock_server)
            .await;

        let config = Config::for_backend(&mock_server.uri());
        let client = reqwest::Client::new();

        let original = DiagnosisResult::new("Leaf", "Rice", "Blast");
        let err = translate_result(&client, &config, &original, Language::ENGLISH)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    }
}
