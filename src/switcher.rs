//! The language switcher widget.
//!
//! One instance owns the active language, the current translation
//! dictionary, the dictionary loader and the preference store; the page it
//! mutates is passed in by the host. Two logical states exist
//! (default-language-displayed and alternate-language-displayed) and every
//! user-driven transition funnels through [`LanguageSwitcher::switch_language`].

use crate::i18n::Language;
use crate::page::{
    Page, ATTR_CONTENT, ATTR_LANG, ATTR_ORIGINAL_PLACEHOLDER, ATTR_ORIGINAL_TEXT,
    ATTR_PLACEHOLDER, ATTR_TRANSLATE, ATTR_TRANSLATE_PLACEHOLDER, CLASS_ACTIVE,
    CLASS_LANG_LABEL, CLASS_LANG_LABEL_ICON, CLASS_LANG_OPTION,
};
use crate::storage::PreferenceStore;
use crate::translations::{DictionaryLoader, TranslationDictionary};
use anyhow::{bail, Result};
use tracing::{debug, info, warn};

/// Fixed icon marker injected ahead of the code in icon-variant labels
const LABEL_ICON: &str = "\u{1F310}";

/// Widget that toggles a page between its default language and a fetched
/// alternate-language dictionary.
#[derive(Debug)]
pub struct LanguageSwitcher {
    loader: DictionaryLoader,
    store: PreferenceStore,
    current: Language,
    translations: TranslationDictionary,
    generation: u64,
}

impl LanguageSwitcher {
    /// Create a widget in the default state: canonical language active,
    /// empty dictionary. Call [`LanguageSwitcher::init`] before use.
    pub fn new(loader: DictionaryLoader, store: PreferenceStore) -> Self {
        Self {
            loader,
            store,
            current: Language::canonical(),
            translations: TranslationDictionary::new(),
            generation: 0,
        }
    }

    /// The currently active language.
    pub fn current_language(&self) -> Language {
        self.current
    }

    /// Number of entries in the currently loaded dictionary.
    pub fn translation_count(&self) -> usize {
        self.translations.len()
    }

    /// Initialize the widget against a freshly loaded page.
    ///
    /// Pre-seeds the original-value cache for every translatable element
    /// (so rollback is possible even when the saved selection is
    /// non-default on first paint), restores the persisted selection, loads
    /// its dictionary and renders the page.
    pub async fn init(&mut self, page: &mut Page) -> Result<()> {
        Self::seed_originals(page);

        let stored = self.store.selected_language();
        let lang = Language::from_code_or_canonical(stored.as_deref());
        self.current = lang;

        self.translations = self.loader.load(&lang).await;
        self.render(page, &lang);

        info!("Initialized with language '{}'", lang.code());
        Ok(())
    }

    /// Switch the page to another language.
    ///
    /// No-op when `code` is already active, so re-selecting the current
    /// language causes neither a fetch nor page churn. Otherwise the
    /// selection is persisted, the dictionary fetched, and the page
    /// re-rendered. Invariant: a fetch that resolves after a newer switch
    /// has begun installs nothing; the newer selection owns the page.
    pub async fn switch_language(&mut self, page: &mut Page, code: &str) -> Result<()> {
        let lang = Language::from_code(code)?;

        if lang == self.current {
            debug!("Language '{}' already active, nothing to do", code);
            return Ok(());
        }

        self.current = lang;
        let token = self.next_generation();

        if let Err(err) = self.store.set_selected_language(lang.code()) {
            warn!("Could not persist language selection: {err:#}");
        }

        let dictionary = self.loader.load(&lang).await;

        if token != self.generation {
            debug!("Switch to '{}' superseded, discarding its dictionary", code);
            return Ok(());
        }

        self.translations = dictionary;
        self.render(page, &lang);

        info!("Switched page language to '{}'", lang.code());
        Ok(())
    }

    /// Handle the activation of a language-option control.
    ///
    /// Reads the control's target code and funnels into
    /// [`LanguageSwitcher::switch_language`]. Clicks on elements that are
    /// not option controls are ignored.
    pub async fn handle_option_click(&mut self, page: &mut Page, index: usize) -> Result<()> {
        let Some(element) = page.elements.get(index) else {
            bail!("No element at index {}", index);
        };

        if !element.has_class(CLASS_LANG_OPTION) {
            debug!("Element {} is not a language option, ignoring click", index);
            return Ok(());
        }

        let Some(code) = element.attr(ATTR_LANG).map(str::to_string) else {
            bail!("Language option at index {} carries no {} attribute", index, ATTR_LANG);
        };

        self.switch_language(page, &code).await
    }

    /// Apply the current dictionary to the page for `lang`.
    ///
    /// Afterwards every keyed element shows the dictionary's value for its
    /// key when present, and its original default-language content
    /// otherwise. Originals are restored first so switching directly
    /// between two non-default languages leaves no stale text.
    pub fn apply_translations(&self, page: &mut Page, lang: &Language) {
        self.restore_originals(page);

        if lang.is_canonical() || self.translations.is_empty() {
            return;
        }

        for element in page.translatable_mut() {
            let Some(key) = element.attr(ATTR_TRANSLATE).map(str::to_string) else {
                continue;
            };
            let Some(value) = self.translations.get(&key) else {
                continue;
            };

            if !element.has_attr(ATTR_ORIGINAL_TEXT) {
                let original = if element.is_meta() {
                    element.attr(ATTR_CONTENT).unwrap_or_default().to_string()
                } else {
                    element.text.clone()
                };
                element.set_attr(ATTR_ORIGINAL_TEXT, original);
            }

            if element.is_meta() {
                element.set_attr(ATTR_CONTENT, value.clone());
            } else {
                element.text = value.clone();
            }
        }

        for element in page.placeholder_translatable_mut() {
            let Some(key) = element.attr(ATTR_TRANSLATE_PLACEHOLDER).map(str::to_string) else {
                continue;
            };
            let Some(value) = self.translations.get(&key) else {
                continue;
            };

            if !element.has_attr(ATTR_ORIGINAL_PLACEHOLDER) {
                let original = element.attr(ATTR_PLACEHOLDER).unwrap_or_default().to_string();
                element.set_attr(ATTR_ORIGINAL_PLACEHOLDER, original);
            }

            element.set_attr(ATTR_PLACEHOLDER, value.clone());
        }
    }

    /// Write every cached original text and placeholder back as current
    /// content. Idempotent; elements without a cache entry are untouched.
    pub fn restore_originals(&self, page: &mut Page) {
        for element in page.elements.iter_mut() {
            if let Some(original) = element.attr(ATTR_ORIGINAL_TEXT).map(str::to_string) {
                if element.is_meta() {
                    element.set_attr(ATTR_CONTENT, original);
                } else {
                    element.text = original;
                }
            }

            if let Some(original) = element.attr(ATTR_ORIGINAL_PLACEHOLDER).map(str::to_string) {
                element.set_attr(ATTR_PLACEHOLDER, original);
            }
        }
    }

    /// Mark the option control for `lang` as active.
    ///
    /// The marker is removed from every control first, so at most one
    /// control is active afterwards.
    pub fn set_active_language(&self, page: &mut Page, lang: &Language) {
        for option in page.lang_options_mut() {
            option.remove_class(CLASS_ACTIVE);
            if option.attr(ATTR_LANG) == Some(lang.code()) {
                option.add_class(CLASS_ACTIVE);
            }
        }
    }

    /// Write the uppercased code into the compact display labels
    /// (e.g., a header dropdown trigger).
    pub fn update_button_text(&self, page: &mut Page, lang: &Language) {
        let code = lang.code().to_uppercase();

        for element in page.elements.iter_mut() {
            if element.has_class(CLASS_LANG_LABEL_ICON) {
                element.text = format!("{LABEL_ICON} {code}");
            } else if element.has_class(CLASS_LANG_LABEL) {
                element.text = code.clone();
            }
        }
    }

    /// Capture the original text/placeholder of every translatable element
    /// that does not already have a cache entry. Never overwrites an
    /// existing entry.
    fn seed_originals(page: &mut Page) {
        for element in page.translatable_mut() {
            if !element.has_attr(ATTR_ORIGINAL_TEXT) {
                let original = if element.is_meta() {
                    element.attr(ATTR_CONTENT).unwrap_or_default().to_string()
                } else {
                    element.text.clone()
                };
                element.set_attr(ATTR_ORIGINAL_TEXT, original);
            }
        }

        for element in page.placeholder_translatable_mut() {
            if !element.has_attr(ATTR_ORIGINAL_PLACEHOLDER) {
                let original = element.attr(ATTR_PLACEHOLDER).unwrap_or_default().to_string();
                element.set_attr(ATTR_ORIGINAL_PLACEHOLDER, original);
            }
        }
    }

    fn render(&self, page: &mut Page, lang: &Language) {
        self.apply_translations(page, lang);
        self.set_active_language(page, lang);
        self.update_button_text(page, lang);
        page.lang = lang.code().to_string();
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
