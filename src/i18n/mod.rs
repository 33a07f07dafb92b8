//! Internationalization (i18n) module for the two display languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their metadata
//! - `language`: Type-safe `Language` validated against the registry
//! - `strings`: Static UI strings per language
//! - `metrics`: Counters for language-switch translations
//!
//! # Example
//!
//! ```rust,ignore
//! use crop_assistant::i18n::Language;
//!
//! let bengali = Language::from_code("bn")?;
//! println!("{}", bengali.strings().history_title);
//! ```

mod language;
mod metrics;
mod registry;
mod strings;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{LanguageStrings, BENGALI_STRINGS, ENGLISH_STRINGS};
