//! Read-only presentation helpers for the question history.

use crate::i18n::Language;
use crate::session::{HistoryEntry, SessionState};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Answers longer than this many words are cut down for the collapsed view.
pub const PREVIEW_WORDS: usize = 30;

struct Patterns {
    bold: Regex,
    italic: Regex,
    heading: Regex,
    blank_lines: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        bold: Regex::new(r"\*\*").expect("valid regex"),
        italic: Regex::new(r"\*").expect("valid regex"),
        heading: Regex::new(r"#{1,6}\s").expect("valid regex"),
        blank_lines: Regex::new(r"\n{3,}").expect("valid regex"),
    })
}

/// Strip markdown emphasis and heading markers from a model answer.
pub fn clean_answer(text: &str) -> String {
    let p = patterns();
    let text = p.bold.replace_all(text, "");
    let text = p.italic.replace_all(&text, "");
    let text = p.heading.replace_all(&text, "");
    let text = p.blank_lines.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerPreview {
    pub text: String,
    pub truncated: bool,
}

/// Words are separated by single spaces only, so line breaks inside the
/// kept words survive into the preview.
pub fn preview_answer(text: &str, max_words: usize) -> AnswerPreview {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= max_words {
        return AnswerPreview {
            text: text.to_string(),
            truncated: false,
        };
    }

    AnswerPreview {
        text: format!("{}...", words[..max_words].join(" ")),
        truncated: true,
    }
}

/// "3 questions" / "3 প্রশ্ন"
pub fn question_count_label(count: usize, language: Language) -> String {
    language
        .strings()
        .history_question_count
        .replace("{count}", &count.to_string())
}

/// One history entry as the history panel shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItemView {
    pub question: String,
    pub answer: String,
    pub preview: AnswerPreview,
    pub timestamp: DateTime<Utc>,
}

impl HistoryItemView {
    pub fn from_entry(entry: &HistoryEntry, language: Language) -> Self {
        let answer = if entry.answer.trim().is_empty() {
            language.strings().history_no_answer.to_string()
        } else {
            clean_answer(&entry.answer)
        };
        let preview = preview_answer(&answer, PREVIEW_WORDS);

        Self {
            question: entry.question.clone(),
            answer,
            preview,
            timestamp: entry.timestamp,
        }
    }
}

/// The full history panel, most recent first.
pub fn history_view(state: &SessionState) -> Vec<HistoryItemView> {
    state
        .history_newest_first()
        .map(|entry| HistoryItemView::from_entry(entry, state.language))
        .collect()
}
