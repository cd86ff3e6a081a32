//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` so the
//! output can be tested without capturing stdout, and [`print_lines`] writes
//! the result. Format functions are pure.
//!
//! ```text
//! Link: /content/page~page=2~.html#top
//!     Kind: path
//!     Base: /content/page.html
//!     Selectors: page=2
//!     Anchor: top
//! ```

use crate::item::Item;
use crate::link::{LinkComponents, LinkKind};
use crate::navigation::NavigationItem;

// ============================================================================
// Shared helpers
// ============================================================================

/// 1-based positional index, 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn labelled(label: &str, value: Option<&str>) -> Option<String> {
    value.map(|v| format!("{}{}: {}", indent(1), label, v))
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Links
// ============================================================================

/// Header line plus one indented line per present component.
pub fn format_components(raw: &str, kind: LinkKind, parts: &LinkComponents) -> Vec<String> {
    let mut lines = vec![format!("Link: {}", raw), format!("{}Kind: {}", indent(1), kind)];
    lines.extend(
        [
            labelled("Base", parts.base.as_deref()),
            labelled("Selectors", parts.selectors.as_deref()),
            labelled("Query", parts.query.as_deref()),
            labelled("Anchor", parts.anchor.as_deref()),
        ]
        .into_iter()
        .flatten(),
    );
    if !kind.is_decomposable() {
        lines.push(format!("{}(not decomposed)", indent(1)));
    }
    lines
}

/// `name = value` per stored property, in name order.
pub fn format_properties<'a>(
    properties: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> Vec<String> {
    properties
        .into_iter()
        .map(|(name, value)| format!("{} = {}", name, value))
        .collect()
}

// ============================================================================
// Items and navigation
// ============================================================================

fn item_line(index: usize, item: &Item) -> String {
    match item.position() {
        Some(pos) => format!(
            "{} {} → {} (position {})",
            format_index(index),
            item.key(),
            item.value(),
            pos
        ),
        None => format!("{} {} → {}", format_index(index), item.key(), item.value()),
    }
}

/// One line per item in the given order.
pub fn format_items(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| item_line(i + 1, item))
        .collect()
}

/// The navigation tree, one node per line, selected nodes marked with `*`.
pub fn format_navigation(items: &[NavigationItem]) -> Vec<String> {
    let mut lines = Vec::new();
    walk_navigation(items, 0, &mut lines);
    lines
}

fn walk_navigation(items: &[NavigationItem], depth: usize, lines: &mut Vec<String>) {
    for (i, node) in items.iter().enumerate() {
        let marker = if node.is_selected() { " *" } else { "" };
        lines.push(format!(
            "{}{}{}",
            indent(depth),
            item_line(i + 1, node.item()),
            marker
        ));
        walk_navigation(node.children(), depth + 1, lines);
    }
}

/// Breadcrumb of values, e.g. `Products › Software`.
pub fn format_trail(trail: &[&NavigationItem]) -> String {
    trail
        .iter()
        .map(|n| n.value())
        .collect::<Vec<_>>()
        .join(" › ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link;
    use crate::navigation::{select_by_key, selected_trail, sort_navigation};
    use crate::test_helpers::sample_navigation;
    use std::collections::BTreeMap;

    #[test]
    fn components_for_path_link() {
        let raw = "/content/page~page=2~.html#top";
        let lines = format_components(raw, link::classify(raw), &link::parse(raw));
        assert_eq!(
            lines,
            [
                "Link: /content/page~page=2~.html#top",
                "    Kind: path",
                "    Base: /content/page.html",
                "    Selectors: page=2",
                "    Anchor: top",
            ]
        );
    }

    #[test]
    fn components_for_unparsable_link() {
        let lines = format_components("x y", LinkKind::Unparsable, &LinkComponents::default());
        assert_eq!(lines, ["Link: x y", "    Kind: unparsable", "    (not decomposed)"]);
    }

    #[test]
    fn items_show_position_when_present() {
        let lines = format_items(&[Item::new("10#title", "Title"), Item::new("plain", "Plain")]);
        assert_eq!(lines, ["001 title → Title (position 10)", "002 plain → Plain"]);
    }

    #[test]
    fn navigation_tree_with_selection() {
        let mut nav = sample_navigation();
        sort_navigation(&mut nav);
        select_by_key(&mut nav, "software");
        let lines = format_navigation(&nav);
        assert_eq!(lines[0], "001 home → Home (position 1)");
        assert_eq!(lines[1], "002 products → Products (position 2) *");
        assert_eq!(lines[3], "    002 software → Software (position 2) *");
        assert_eq!(format_trail(&selected_trail(&nav)), "Products › Software");
    }

    #[test]
    fn properties_in_name_order() {
        let mut props = BTreeMap::new();
        props.insert("link_query".to_string(), "a=1".to_string());
        props.insert("link".to_string(), "/a".to_string());
        assert_eq!(format_properties(&props), ["link = /a", "link_query = a=1"]);
    }
}
