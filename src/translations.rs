//! Translation dictionary loading.
//!
//! One JSON document per non-default language, fetched from a URL templated
//! by language code. The payload is a flat mapping from opaque key to display
//! string; there is no schema beyond successful parsing into that shape.
//!
//! A load failure must degrade to "no translation applied", never break the
//! page: every failure is logged and collapses to an empty dictionary at the
//! [`DictionaryLoader::load`] boundary.

use crate::i18n::Language;
use reqwest::StatusCode;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Flat mapping from translation key to display string for one language.
pub type TranslationDictionary = HashMap<String, String>;

/// Why a dictionary could not be loaded.
///
/// All variants collapse to the same fallback (an empty dictionary); the
/// distinction only exists for the log line.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The request never produced a response (connect error, timeout, ...)
    #[error("request for {url} failed: {source}")]
    Request {
        /// Resource that was requested
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Resource that was requested
        url: String,
        /// Status code of the response
        status: StatusCode,
    },

    /// The body was not a flat string-to-string JSON mapping
    #[error("{url} returned a malformed dictionary: {source}")]
    Parse {
        /// Resource that was requested
        url: String,
        /// Underlying decode error
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches per-language translation dictionaries.
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryLoader {
    /// Create a loader fetching from `{base_url}/{code}.json`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The resource URL for a language.
    pub fn url_for(&self, lang: &Language) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), lang.code())
    }

    /// Load the dictionary for a language.
    ///
    /// The canonical language has no dictionary: the page's own markup is
    /// the content, so the result is empty and no request is made. For any
    /// other language, a failed fetch is logged and also yields an empty
    /// dictionary, which downstream means "show original content".
    pub async fn load(&self, lang: &Language) -> TranslationDictionary {
        if lang.is_canonical() {
            return TranslationDictionary::new();
        }

        match self.fetch(lang).await {
            Ok(dictionary) => {
                debug!(
                    "Loaded {} translation entries for '{}'",
                    dictionary.len(),
                    lang.code()
                );
                dictionary
            }
            Err(err) => {
                warn!("Error loading translations: {err}");
                TranslationDictionary::new()
            }
        }
    }

    async fn fetch(&self, lang: &Language) -> Result<TranslationDictionary, DictionaryError> {
        let url = self.url_for(lang);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| DictionaryError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status { url, status });
        }

        response
            .json::<TranslationDictionary>()
            .await
            .map_err(|source| DictionaryError::Parse { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn loader_for(server: &MockServer) -> DictionaryLoader {
        DictionaryLoader::new(
            reqwest::Client::new(),
            format!("{}/assets/translations", server.uri()),
        )
    }

    // ==================== URL Template Tests ====================

    #[test]
    fn test_url_for_appends_code_and_extension() {
        let loader = DictionaryLoader::new(reqwest::Client::new(), "http://host/translations");
        assert_eq!(
            loader.url_for(&Language::GERMAN),
            "http://host/translations/de.json"
        );
    }

    #[test]
    fn test_url_for_tolerates_trailing_slash() {
        let loader = DictionaryLoader::new(reqwest::Client::new(), "http://host/translations/");
        assert_eq!(
            loader.url_for(&Language::FRENCH),
            "http://host/translations/fr.json"
        );
    }

    // ==================== Load Tests ====================

    #[tokio::test]
    async fn test_load_canonical_is_empty_without_request() {
        let server = MockServer::start().await;
        // No mock registered: any request would return a 404 and the mock
        // server records it. The canonical language must not hit the network.
        let loader = loader_for(&server);

        let dictionary = loader.load(&Language::ENGLISH).await;

        assert!(dictionary.is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_parses_flat_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/translations/de.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "greeting": "Willkommen",
                "cta": "Jetzt anfragen"
            })))
            .mount(&server)
            .await;

        let dictionary = loader_for(&server).load(&Language::GERMAN).await;

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("greeting").map(String::as_str), Some("Willkommen"));
    }

    #[tokio::test]
    async fn test_load_degrades_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/translations/fr.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dictionary = loader_for(&server).load(&Language::FRENCH).await;

        assert!(dictionary.is_empty());
    }

    #[tokio::test]
    async fn test_load_degrades_on_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/translations/de.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let dictionary = loader_for(&server).load(&Language::GERMAN).await;

        assert!(dictionary.is_empty());
    }

    #[tokio::test]
    async fn test_load_degrades_on_non_flat_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/translations/de.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nested": {"greeting": "Willkommen"}
            })))
            .mount(&server)
            .await;

        let dictionary = loader_for(&server).load(&Language::GERMAN).await;

        assert!(dictionary.is_empty());
    }

    #[tokio::test]
    async fn test_load_degrades_on_connect_error() {
        // Nothing listens on this port
        let loader = DictionaryLoader::new(reqwest::Client::new(), "http://127.0.0.1:9/translations");

        let dictionary = loader.load(&Language::GERMAN).await;

        assert!(dictionary.is_empty());
    }
}
