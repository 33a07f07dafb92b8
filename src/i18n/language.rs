//! Language type: a session language validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated language.
///
/// Only codes present in the registry can be turned into a
/// `Language`, so every value maps to a known string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "bn")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const BENGALI: Language = Language { code: "bn" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the registry
    /// * `Err` if the code is not found
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Every supported language, in display order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list()
            .iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// The language a fresh session starts in.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a value built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    /// Static UI strings for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.config().strings
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s.trim())
    }
}

// Languages travel as their bare code ("en", "bn") on every wire.
impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_constant() {
        assert_eq!(Language::ENGLISH.code(), "en");
        assert_eq!(Language::ENGLISH.name(), "English");
        assert!(Language::ENGLISH.is_canonical());
    }

    #[test]
    fn test_bengali_constant() {
        assert_eq!(Language::BENGALI.code(), "bn");
        assert_eq!(Language::BENGALI.name(), "Bengali");
        assert_eq!(Language::BENGALI.native_name(), "বাংলা");
        assert!(!Language::BENGALI.is_canonical());
    }

    #[test]
    fn test_from_code_round_trips_constants() {
        assert_eq!(Language::from_code("en").ok(), Some(Language::ENGLISH));
        assert_eq!(Language::from_code("bn").ok(), Some(Language::BENGALI));
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("es");
        assert!(result.unwrap_err().to_string().contains("Unknown"));
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_from_str_trims_whitespace() {
        let lang: Language = " bn ".parse().expect("should parse");
        assert_eq!(lang, Language::BENGALI);
    }

    #[test]
    fn test_all_lists_both_languages() {
        assert_eq!(Language::all(), vec![Language::ENGLISH, Language::BENGALI]);
    }

    #[test]
    fn test_default_is_canonical() {
        assert_eq!(Language::default(), Language::ENGLISH);
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Language::BENGALI).expect("serialize");
        assert_eq!(json, "\"bn\"");
    }

    #[test]
    fn test_deserialize_rejects_unknown_code() {
        let parsed: Result<Language, _> = serde_json::from_str("\"de\"");
        assert!(parsed.is_err());

        let parsed: Language = serde_json::from_str("\"en\"").expect("deserialize");
        assert_eq!(parsed, Language::ENGLISH);
    }

    #[test]
    fn test_strings_follow_language() {
        assert_eq!(Language::ENGLISH.strings().language, "Language");
        assert_eq!(Language::BENGALI.strings().language, "ভাষা");
    }
}
