//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is a lazily-initialized singleton (`OnceLock`) holding the
//! metadata and string table of every language the assistant can display.

use crate::i18n::strings::{LanguageStrings, BENGALI_STRINGS, ENGLISH_STRINGS};
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "bn")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Bengali")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "বাংলা")
    pub native_name: &'static str,

    /// Whether this is the canonical language (the session starts in it)
    pub is_canonical: bool,

    /// Static UI strings shown while this language is active
    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in display order.
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one canonical language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// English (canonical) and Bengali, the two languages the backend supports.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            strings: &ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "bn",
            name: "Bengali",
            native_name: "বাংলা",
            is_canonical: false,
            strings: &BENGALI_STRINGS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_bengali() {
        let config = LanguageRegistry::get()
            .get_by_code("bn")
            .expect("bn should be registered");

        assert_eq!(config.name, "Bengali");
        assert_eq!(config.native_name, "বাংলা");
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("es").is_none());
    }

    #[test]
    fn test_list_keeps_display_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(codes, vec!["en", "bn"]);
    }

    #[test]
    fn test_canonical_is_english() {
        let canonical = LanguageRegistry::get().canonical();
        assert_eq!(canonical.code, "en");
    }
}
