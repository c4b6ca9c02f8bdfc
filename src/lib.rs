//! Language toggle engine for static marketing pages.
//!
//! The page ships authored in one default language; this crate switches it
//! to an alternate language at runtime by fetching a flat JSON dictionary,
//! swapping keyed text and placeholder content in place, and remembering
//! the selection across page loads.

pub mod config;
pub mod i18n;
pub mod page;
pub mod storage;
pub mod switcher;
pub mod translations;
