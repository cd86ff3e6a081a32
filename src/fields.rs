//! Storing an extended link across sibling properties.
//!
//! A link field named `link` keeps the base in `link` and the other
//! components next to it:
//!
//! ```text
//! link          = /content/page.html
//! link_selector = page=2~print
//! link_query    = lang=de
//! link_anchor   = comments
//! ```
//!
//! Suffixes come from [`FieldsConfig`]. Links that cannot be decomposed
//! (external or unparsable) are stored verbatim in the base property.

use crate::config::FieldsConfig;
use crate::link::{self, LinkKind};
use std::collections::BTreeMap;

/// Flat string property storage, such as a content record.
pub trait PropertyStore {
    fn property(&self, name: &str) -> Option<String>;
    fn set_property(&mut self, name: &str, value: &str);
    fn remove_property(&mut self, name: &str);
}

impl PropertyStore for BTreeMap<String, String> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.remove(name);
    }
}

/// Property names used for one link field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub base: String,
    pub selector: String,
    pub query: String,
    pub anchor: String,
}

impl FieldNames {
    pub fn new(field: &str, suffixes: &FieldsConfig) -> Self {
        Self {
            base: field.to_string(),
            selector: format!("{field}{}", suffixes.selector_suffix),
            query: format!("{field}{}", suffixes.query_suffix),
            anchor: format!("{field}{}", suffixes.anchor_suffix),
        }
    }

    fn siblings(&self) -> [&str; 3] {
        [&self.selector, &self.query, &self.anchor]
    }
}

/// Split `raw` into the field's properties, replacing whatever was there.
///
/// Blank input clears all four properties.
pub fn write_link<S: PropertyStore + ?Sized>(store: &mut S, names: &FieldNames, raw: &str) {
    if raw.trim().is_empty() {
        store.remove_property(&names.base);
        clear_siblings(store, names);
        return;
    }

    let kind = link::classify(raw);
    if !kind.is_decomposable() {
        if kind == LinkKind::Unparsable {
            log::debug!("storing unparsable link {raw:?} verbatim in {}", names.base);
        }
        store.set_property(&names.base, raw);
        clear_siblings(store, names);
        return;
    }

    let parts = link::parse(raw);
    put(store, &names.base, parts.base.as_deref());
    put(store, &names.selector, parts.selectors.as_deref());
    put(store, &names.query, parts.query.as_deref());
    put(store, &names.anchor, parts.anchor.as_deref());
}

/// Reassemble the link stored under `names`; `None` when nothing is stored.
pub fn read_link<S: PropertyStore + ?Sized>(store: &S, names: &FieldNames) -> Option<String> {
    let base = store.property(&names.base);
    if let Some(base) = &base {
        if link::classify(base) == LinkKind::External {
            return Some(base.clone());
        }
    }

    let selectors = store.property(&names.selector);
    let query = store.property(&names.query);
    let anchor = store.property(&names.anchor);
    let merged = link::merge(
        base.as_deref(),
        selectors.as_deref(),
        query.as_deref(),
        anchor.as_deref(),
    );
    (!merged.is_empty()).then_some(merged)
}

fn put<S: PropertyStore + ?Sized>(store: &mut S, name: &str, value: Option<&str>) {
    match value {
        Some(value) => store.set_property(name, value),
        None => store.remove_property(name),
    }
}

fn clear_siblings<S: PropertyStore + ?Sized>(store: &mut S, names: &FieldNames) {
    for sibling in names.siblings() {
        store.remove_property(sibling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> FieldNames {
        FieldNames::new("link", &FieldsConfig::default())
    }

    #[test]
    fn names_use_suffixes() {
        let names = names();
        assert_eq!(names.selector, "link_selector");
        assert_eq!(names.query, "link_query");
        assert_eq!(names.anchor, "link_anchor");
    }

    #[test]
    fn write_splits_components() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        write_link(&mut store, &names(), "/content/page~page=2~.html?lang=de#comments");
        assert_eq!(store["link"], "/content/page.html");
        assert_eq!(store["link_selector"], "page=2");
        assert_eq!(store["link_query"], "lang=de");
        assert_eq!(store["link_anchor"], "comments");
    }

    #[test]
    fn read_reassembles_written_link() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        let raw = "dc307c08-5a19-4260-a304-a5611d1ca900~print~?a=1";
        write_link(&mut store, &names(), raw);
        assert_eq!(read_link(&store, &names()).as_deref(), Some(raw));
    }

    #[test]
    fn rewrite_clears_stale_siblings() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        write_link(&mut store, &names(), "/a~x=1~?q=1#top");
        write_link(&mut store, &names(), "/b");
        assert_eq!(store.len(), 1);
        assert_eq!(store["link"], "/b");
    }

    #[test]
    fn external_link_stored_verbatim() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        write_link(&mut store, &names(), "/a#top");
        write_link(&mut store, &names(), "https://example.com/x?y=1#z");
        assert_eq!(store.len(), 1);
        assert_eq!(
            read_link(&store, &names()).as_deref(),
            Some("https://example.com/x?y=1#z")
        );
    }

    #[test]
    fn unparsable_link_falls_back_to_raw() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        write_link(&mut store, &names(), "some page");
        assert_eq!(store["link"], "some page");
        assert_eq!(read_link(&store, &names()).as_deref(), Some("some page"));
    }

    #[test]
    fn anchor_only_has_no_base_property() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        write_link(&mut store, &names(), "#top");
        assert!(!store.contains_key("link"));
        assert_eq!(read_link(&store, &names()).as_deref(), Some("#top"));
    }

    #[test]
    fn blank_clears_everything() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        write_link(&mut store, &names(), "/a~x=1~");
        write_link(&mut store, &names(), "  ");
        assert!(store.is_empty());
        assert_eq!(read_link(&store, &names()), None);
    }

    #[test]
    fn other_properties_untouched() {
        let mut store: BTreeMap<String, String> = BTreeMap::new();
        store.set_property("title", "Hello");
        write_link(&mut store, &names(), "/a");
        assert_eq!(store["title"], "Hello");
    }
}
