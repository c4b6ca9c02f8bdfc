//! In-memory model of the static page the switcher mutates.
//!
//! The page is authored in the default language; elements opt into
//! translation by carrying a key attribute. The switcher never owns
//! elements; it only reads and writes content, attributes and classes
//! on elements that already exist in the page, and it stores the
//! original-value cache as attributes on the elements themselves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key attribute for translatable text content
pub const ATTR_TRANSLATE: &str = "data-translate";

/// Key attribute for translatable placeholder content
pub const ATTR_TRANSLATE_PLACEHOLDER: &str = "data-translate-placeholder";

/// Cache attribute holding the original (default-language) text
pub const ATTR_ORIGINAL_TEXT: &str = "data-original-text";

/// Cache attribute holding the original (default-language) placeholder
pub const ATTR_ORIGINAL_PLACEHOLDER: &str = "data-original-placeholder";

/// Attribute carrying a language-option control's target code
pub const ATTR_LANG: &str = "data-lang";

/// Placeholder attribute on form elements
pub const ATTR_PLACEHOLDER: &str = "placeholder";

/// Content attribute on meta elements
pub const ATTR_CONTENT: &str = "content";

/// Marker class identifying language-option controls
pub const CLASS_LANG_OPTION: &str = "lang-option";

/// Class marking the currently selected language option
pub const CLASS_ACTIVE: &str = "active";

/// Class marking elements that display the current language code
pub const CLASS_LANG_LABEL: &str = "lang-label";

/// Same as `lang-label`, but prefixed with a globe icon marker
pub const CLASS_LANG_LABEL_ICON: &str = "lang-label-icon";

/// A single page element: tag, text content, attributes and classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (e.g., "h1", "input", "title", "meta")
    pub tag: String,

    /// Text content of the element
    #[serde(default)]
    pub text: String,

    /// Attribute map; placeholders, meta content and translation keys all
    /// live here, as they do in markup
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Class list
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Element {
    /// Create an element with no content, attributes or classes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: String::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
        }
    }

    /// Builder-style: set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder-style: set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style: add a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Check whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Check whether the element carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Whether this element is a `meta` tag, translated through its
    /// `content` attribute rather than its text content.
    pub fn is_meta(&self) -> bool {
        self.tag == "meta"
    }
}

/// The page: a language attribute plus a flat list of elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Document language attribute (`<html lang="...">`)
    pub lang: String,

    /// All elements the switcher can see
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    /// Create an empty page authored in the given language.
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            elements: Vec::new(),
        }
    }

    /// Add an element and return its index.
    pub fn push(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// The `title` element, if the page has one.
    pub fn title(&self) -> Option<&Element> {
        self.elements.iter().find(|e| e.tag == "title")
    }

    /// The `meta[name="description"]` element, if the page has one.
    pub fn meta_description(&self) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.is_meta() && e.attr("name") == Some("description"))
    }

    /// All elements carrying a text translation key.
    pub fn translatable(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.has_attr(ATTR_TRANSLATE))
    }

    /// Mutable variant of [`Page::translatable`].
    pub fn translatable_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements
            .iter_mut()
            .filter(|e| e.has_attr(ATTR_TRANSLATE))
    }

    /// All elements carrying a placeholder translation key.
    pub fn placeholder_translatable_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements
            .iter_mut()
            .filter(|e| e.has_attr(ATTR_TRANSLATE_PLACEHOLDER))
    }

    /// All language-option controls.
    pub fn lang_options(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| e.has_class(CLASS_LANG_OPTION))
    }

    /// Mutable variant of [`Page::lang_options`].
    pub fn lang_options_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements
            .iter_mut()
            .filter(|e| e.has_class(CLASS_LANG_OPTION))
    }

    /// The single option control currently marked active, if any.
    pub fn active_option(&self) -> Option<&Element> {
        self.lang_options().find(|e| e.has_class(CLASS_ACTIVE))
    }
}
