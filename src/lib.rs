//! # Extended Link
//!
//! Codec and helpers for "extended links": CMS link field values that carry
//! a target node plus a selector chain, a query string and an anchor in a
//! single string.
//!
//! ```text
//! /content/page~page=2~print~.html?lang=de#comments
//! dc307c08-5a19-4260-a304-a5611d1ca900~print~#top
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`link`] | Classify, parse and merge extended links |
//! | [`selectors`] | Read and update the `~key=value~` selector chain |
//! | [`fields`] | Store a link across `<name>`, `<name>_selector`, `<name>_query`, `<name>_anchor` |
//! | [`item`] | Key/value items with `NN#key` position prefixes and their ordering |
//! | [`navigation`] | Navigation trees of items with a selection trail |
//! | [`locale`] | Map requested locales onto published site locales |
//! | [`config`] | `config.toml` loading, merging, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Codec
//!
//! [`link::parse`] and [`link::merge`] are the only place the link grammar
//! lives. Selector updates and sibling-field storage go through them, so the
//! round trip `parse(s).to_link() == s` holds for everything this crate
//! writes.
//!
//! ## Selectors Before the Extension
//!
//! Selectors are inserted in front of the extension of the last path
//! segment, then the query and anchor are appended. The extension search
//! stops at the last `/` so dotted folder names are left alone.
//!
//! ## No Global State
//!
//! Locale lookups are memoised in an explicit [`locale::LocaleContext`]
//! owned by the caller, with `invalidate` and `reconfigure` instead of a
//! process-wide cache.
//!
//! ## Item Ordering Is Not Total
//!
//! [`item::Item::compare_to`] decides by the left-hand item's prefix alone,
//! so mixing prefixed and unprefixed items gives an inconsistent relation.
//! The crate sorts with a stable insertion sort that tolerates this instead
//! of implementing `Ord`.

pub mod config;
pub mod fields;
pub mod item;
pub mod link;
pub mod locale;
pub mod navigation;
pub mod output;
pub mod selectors;

#[cfg(test)]
pub(crate) mod test_helpers;
