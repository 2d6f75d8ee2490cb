//! Commander autocomplete: a debounced, race-safe search-and-select component
//! backed by the Scryfall card search, plus the iced host that embeds it.

pub mod app;
pub mod autocomplete;
pub mod config;
pub mod search;
pub mod ui;
