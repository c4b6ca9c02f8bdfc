use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use language_switcher::config::Config;
use language_switcher::page::Page;
use language_switcher::storage::PreferenceStore;
use language_switcher::switcher::LanguageSwitcher;
use language_switcher::translations::DictionaryLoader;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_switcher=info".parse()?),
        )
        .init();

    info!("Starting language switcher");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Load the page snapshot; one run models one page load plus at most
    // one language selection
    let raw = std::fs::read_to_string(&config.page_file)
        .with_context(|| format!("Failed to read page snapshot {}", config.page_file))?;
    let mut page: Page = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse page snapshot {}", config.page_file))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let mut switcher = LanguageSwitcher::new(
        DictionaryLoader::new(client, config.translations_base_url.clone()),
        PreferenceStore::new(&config.storage_path),
    );

    // Restore the persisted selection and render the page
    switcher.init(&mut page).await?;

    // An optional language code argument models a click on that option
    if let Some(code) = std::env::args().nth(1) {
        info!("Switching to '{}'", code);
        switcher.switch_language(&mut page, &code).await?;
    }

    let json = serde_json::to_string_pretty(&page).context("Failed to serialize page snapshot")?;
    std::fs::write(&config.page_file, json)
        .with_context(|| format!("Failed to write page snapshot {}", config.page_file))?;

    info!(
        "Page is in '{}' ({} translation entries loaded)",
        switcher.current_language().code(),
        switcher.translation_count()
    );
    Ok(())
}
