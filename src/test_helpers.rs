//! Shared test utilities.
//!
//! Config fixtures backed by `tempfile`, a sample navigation tree, and
//! navigation shape assertions.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut nav = sample_navigation();
//! sort_navigation(&mut nav);
//! assert_nav_keys(&nav, &[
//!     ("home", &[]),
//!     ("products", &["hardware", "software"]),
//!     ("about", &[]),
//! ]);
//! ```

use std::fs;
use tempfile::TempDir;

use crate::config::CONFIG_FILENAME;
use crate::navigation::NavigationItem;

// =========================================================================
// Fixture setup
// =========================================================================

/// Temp directory holding a `config.toml` with `content`.
pub fn write_config(content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(CONFIG_FILENAME), content).unwrap();
    tmp
}

/// Unsorted three-entry navigation with one nested level.
pub fn sample_navigation() -> Vec<NavigationItem> {
    vec![
        NavigationItem::new("3#about", "About"),
        NavigationItem::new("2#products", "Products").with_children([
            NavigationItem::new("2#software", "Software"),
            NavigationItem::new("1#hardware", "Hardware"),
        ]),
        NavigationItem::new("1#home", "Home"),
    ]
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Keys (prefix stripped) of one navigation level, in order.
pub fn nav_keys(items: &[NavigationItem]) -> Vec<&str> {
    items.iter().map(NavigationItem::key).collect()
}

/// Assert a two-level navigation shape. Each entry is `(key, child keys)`.
pub fn assert_nav_keys(items: &[NavigationItem], expected: &[(&str, &[&str])]) {
    let expected_keys: Vec<&str> = expected.iter().map(|(k, _)| *k).collect();
    assert_eq!(nav_keys(items), expected_keys, "nav top-level keys mismatch");

    for (key, children) in expected {
        let node = items
            .iter()
            .find(|n| n.key() == *key)
            .unwrap_or_else(|| panic!("nav item '{key}' not found"));
        assert_eq!(
            nav_keys(node.children()),
            children.to_vec(),
            "nav children of '{key}' mismatch"
        );
    }
}
