use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Diagnosis produced by the backend for one uploaded image.
///
/// Replaced wholesale by a new upload or a committed language switch, never
/// edited field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisResult {
    pub caption: String,
    pub crop: String,
    pub disease: String,
}

impl DiagnosisResult {
    pub fn new(
        caption: impl Into<String>,
        crop: impl Into<String>,
        disease: impl Into<String>,
    ) -> Self {
        Self {
            caption: caption.into(),
            crop: crop.into(),
            disease: disease.into(),
        }
    }

    /// Context sent along with a question: one labelled line per non-empty field.
    pub fn context_summary(&self) -> String {
        [
            ("Caption", &self.caption),
            ("Crop", &self.crop),
            ("Disease", &self.disease),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// One question/answer exchange about the current diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now(),
        }
    }
}
