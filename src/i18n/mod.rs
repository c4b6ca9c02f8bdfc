//! Internationalization (i18n) module.
//!
//! The closed set of languages the page supports, and the validated
//! `Language` type the rest of the crate passes around.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe Language type validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use language_switcher::i18n::{Language, LanguageRegistry};
//!
//! // The language the markup is authored in
//! let canonical = Language::canonical();
//!
//! // Validate a code from a lang-option control
//! let german = Language::from_code("de")?;
//!
//! // List all selectable languages
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
