use crate::i18n::Language;
use crate::session::{DiagnosisResult, HistoryEntry};
use serde::Serialize;
use std::fmt;

/// Everything a view renders, always in a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub language: Language,
    pub result: Option<DiagnosisResult>,

    /// Insertion order; views reverse it.
    pub history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            result: None,
            history: Vec::new(),
        }
    }

    /// History in display order, most recent first.
    pub fn history_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev()
    }
}

/// Which flow currently owns the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Idle,
    Diagnosing,
    Answering,
    Translating,
}

impl Activity {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Activity::Idle => 0,
            Activity::Diagnosing => 1,
            Activity::Answering => 2,
            Activity::Translating => 3,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Activity {
        match value {
            1 => Activity::Diagnosing,
            2 => Activity::Answering,
            3 => Activity::Translating,
            _ => Activity::Idle,
        }
    }

    pub fn is_busy(self) -> bool {
        self != Activity::Idle
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Activity::Idle => "idle",
            Activity::Diagnosing => "diagnosing an image",
            Activity::Answering => "answering a question",
            Activity::Translating => "switching language",
        };
        f.write_str(label)
    }
}
