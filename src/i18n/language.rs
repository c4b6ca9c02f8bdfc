//! Language type: a language code validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use tracing::warn;

/// A validated language.
///
/// Only codes that are registered and enabled can be constructed, so a
/// `Language` value is always safe to fetch a dictionary for or to write
/// into the page's language attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "de")
    code: &'static str,
}

impl Language {
    /// English, the canonical language of the static markup.
    pub const ENGLISH: Language = Language { code: "en" };

    /// German, the page's primary alternate language.
    pub const GERMAN: Language = Language { code: "de" };

    /// French.
    pub const FRENCH: Language = Language { code: "fr" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Resolve a stored or user-supplied code, falling back to the
    /// canonical language when the code is absent or invalid.
    ///
    /// This is the restore path for the persisted selection: a missing or
    /// corrupted value must never keep the page from rendering.
    pub fn from_code_or_canonical(code: Option<&str>) -> Language {
        match code {
            None => Language::canonical(),
            Some(code) => Language::from_code(code).unwrap_or_else(|err| {
                warn!("Ignoring persisted language selection: {err}");
                Language::canonical()
            }),
        }
    }

    /// The canonical language: the one the markup is authored in, which
    /// needs no dictionary.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// The ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// `Language` constructed through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// The English name of the language (e.g., "German").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// The native name of the language (e.g., "Deutsch").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}
