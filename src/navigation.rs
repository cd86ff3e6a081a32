//! Navigation tree built from [`Item`]s.
//!
//! Each node owns its children; there are no parent links. Ordering of
//! siblings is the caller's job ([`sort_navigation`] applies the item
//! ordering at every level).

use crate::item::{Item, ItemError, insertion_sort_by};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A navigation entry: an item, its children and a selection flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    #[serde(flatten)]
    item: Item,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<NavigationItem>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    selected: bool,
}

impl NavigationItem {
    pub fn new(raw_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_item(Item::new(raw_key, value))
    }

    pub fn from_item(item: Item) -> Self {
        Self {
            item,
            children: Vec::new(),
            selected: false,
        }
    }

    /// Builder form of [`push_child`](Self::push_child) for whole subtrees.
    pub fn with_children(mut self, children: impl IntoIterator<Item = NavigationItem>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.item
    }

    pub fn key(&self) -> &str {
        self.item.key()
    }

    pub fn value(&self) -> &str {
        self.item.value()
    }

    pub fn children(&self) -> &[NavigationItem] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<NavigationItem> {
        &mut self.children
    }

    pub fn push_child(&mut self, child: NavigationItem) {
        self.children.push(child);
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Item ordering; children play no part.
    pub fn compare_to(&self, other: Option<&NavigationItem>) -> Result<Ordering, ItemError> {
        self.item.compare_to(other.map(|o| &o.item))
    }

    /// Sort this node's subtree; the node itself stays where it is.
    pub fn sort_recursive(&mut self) {
        sort_navigation(&mut self.children);
    }
}

/// Sort siblings by item ordering, recursing into every subtree.
pub fn sort_navigation(items: &mut [NavigationItem]) {
    insertion_sort_by(items, |a, b| {
        a.compare_to(Some(b)).unwrap_or(Ordering::Equal)
    });
    for item in items.iter_mut() {
        item.sort_recursive();
    }
}

/// Selected nodes from the top level down to the deepest selected one.
///
/// At each level the first selected sibling is followed.
pub fn selected_trail(items: &[NavigationItem]) -> Vec<&NavigationItem> {
    let mut trail = Vec::new();
    let mut level = items;
    while let Some(node) = level.iter().find(|n| n.selected) {
        trail.push(node);
        level = &node.children;
    }
    trail
}

/// Select the node whose key is `key` together with its ancestors, and
/// clear every other selection. Returns whether the key was found.
pub fn select_by_key(items: &mut [NavigationItem], key: &str) -> bool {
    let mut found = false;
    for item in items.iter_mut() {
        let below = select_by_key(&mut item.children, key);
        let hit = below || item.key() == key;
        item.selected = hit;
        found |= hit;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_nav_keys, nav_keys, sample_navigation};

    #[test]
    fn sort_orders_every_level() {
        let mut nav = sample_navigation();
        sort_navigation(&mut nav);
        assert_nav_keys(
            &nav,
            &[
                ("home", &[]),
                ("products", &["hardware", "software"]),
                ("about", &[]),
            ],
        );
    }

    #[test]
    fn select_marks_ancestors() {
        let mut nav = sample_navigation();
        assert!(select_by_key(&mut nav, "software"));
        let trail = selected_trail(&nav);
        let trail: Vec<&str> = trail.iter().map(|n| n.key()).collect();
        assert_eq!(trail, ["products", "software"]);
    }

    #[test]
    fn reselect_clears_previous() {
        let mut nav = sample_navigation();
        select_by_key(&mut nav, "software");
        select_by_key(&mut nav, "about");
        let trail = selected_trail(&nav);
        let trail: Vec<&str> = trail.iter().map(|n| n.key()).collect();
        assert_eq!(trail, ["about"]);
    }

    #[test]
    fn select_unknown_key_clears_all() {
        let mut nav = sample_navigation();
        select_by_key(&mut nav, "software");
        assert!(!select_by_key(&mut nav, "missing"));
        assert!(selected_trail(&nav).is_empty());
    }

    #[test]
    fn compare_delegates_to_item() {
        let a = NavigationItem::new("10#title", "Title");
        let b = NavigationItem::new("2#alpha", "Alpha")
            .with_children([NavigationItem::new("x", "X")]);
        assert_eq!(a.compare_to(Some(&b)), Ok(Ordering::Less));
        assert!(a.compare_to(None).is_err());
    }

    #[test]
    fn sort_recursive_leaves_node_in_place() {
        let mut node = NavigationItem::new("1#root", "Root")
            .with_children([NavigationItem::new("2#b", "B"), NavigationItem::new("1#a", "A")]);
        node.sort_recursive();
        assert_eq!(nav_keys(node.children()), ["a", "b"]);
    }

    #[test]
    fn json_shape() {
        let mut node = NavigationItem::new("1#home", "Home");
        node.set_selected(true);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"key":"1#home","value":"Home","selected":true}"#);

        let back: NavigationItem = serde_json::from_str(
            r#"{"key":"1#home","value":"Home","children":[{"key":"a","value":"A"}]}"#,
        )
        .unwrap();
        assert!(!back.is_selected());
        assert_eq!(back.children().len(), 1);
    }
}
