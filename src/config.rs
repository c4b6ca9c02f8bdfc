use anyhow::{Context, Result};

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_base_url: String,

    // State
    pub storage_path: String,
    pub page_file: String,

    // HTTP
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Base URL the per-language dictionaries are served under
            translations_base_url: std::env::var("TRANSLATIONS_BASE_URL")
                .context("TRANSLATIONS_BASE_URL not set")?,

            // Persisted language selection
            storage_path: std::env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "data/selected_language.json".to_string()),

            // Page snapshot the driver loads and writes back
            page_file: std::env::var("PAGE_FILE")
                .unwrap_or_else(|_| "data/page.json".to_string()),

            // Dictionary fetch timeout
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("TRANSLATIONS_BASE_URL");
        std::env::remove_var("STORAGE_PATH");
        std::env::remove_var("PAGE_FILE");
        std::env::remove_var("REQUEST_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_from_env_requires_base_url() {
        clear_env();
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_applies_defaults() {
        clear_env();
        std::env::set_var("TRANSLATIONS_BASE_URL", "http://localhost/translations");

        let config = Config::from_env().unwrap();

        assert_eq!(config.translations_base_url, "http://localhost/translations");
        assert_eq!(config.storage_path, "data/selected_language.json");
        assert_eq!(config.page_file, "data/page.json");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        std::env::set_var("TRANSLATIONS_BASE_URL", "http://cdn/translations");
        std::env::set_var("STORAGE_PATH", "/tmp/lang.json");
        std::env::set_var("PAGE_FILE", "/tmp/page.json");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "3");

        let config = Config::from_env().unwrap();

        assert_eq!(config.storage_path, "/tmp/lang.json");
        assert_eq!(config.page_file, "/tmp/page.json");
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_unparsable_timeout() {
        clear_env();
        std::env::set_var("TRANSLATIONS_BASE_URL", "http://localhost/translations");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "soon");

        let config = Config::from_env().unwrap();

        assert_eq!(config.request_timeout_secs, 10);
    }
}
