//! Ordered key/value items for sorted label lists.
//!
//! A raw key may carry a numeric sort prefix before a `#`, e.g.
//! `"10#title"`. Items with such a prefix order by raw key; everything else
//! orders by value, then raw key.
//!
//! The raw-key comparison is textual, so `"10#title"` sorts before
//! `"2#alpha"`. Zero-pad prefixes (`"02#alpha"`) when numeric order matters.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Separates the sort prefix from the key.
pub const POSITION_DELIMITER: char = '#';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// A key/value pair with an optional position prefix in its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "key")]
    raw_key: String,
    value: String,
}

impl Item {
    pub fn new(raw_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            raw_key: raw_key.into(),
            value: value.into(),
        }
    }

    /// The key as given, prefix included.
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_raw_key(&mut self, raw_key: impl Into<String>) {
        self.raw_key = raw_key.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Integer before the first `#`.
    ///
    /// `None` when there is no `#`, the prefix is empty, or it does not
    /// parse as an integer.
    pub fn position(&self) -> Option<i32> {
        let (prefix, _) = self.raw_key.split_once(POSITION_DELIMITER)?;
        prefix.parse().ok()
    }

    /// The key with any position prefix removed.
    pub fn key(&self) -> &str {
        match self.raw_key.split_once(POSITION_DELIMITER) {
            Some((_, key)) => key,
            None => &self.raw_key,
        }
    }

    fn has_position(&self) -> bool {
        self.position().is_some_and(|p| p > -1)
    }

    /// Compare with `other`; a missing partner is an invalid argument.
    ///
    /// The relation looks at `self`'s prefix only, so it is not symmetric
    /// between prefixed and unprefixed items. Sort with [`sort_items`].
    pub fn compare_to(&self, other: Option<&Item>) -> Result<Ordering, ItemError> {
        let other = other.ok_or(ItemError::InvalidArgument(
            "cannot compare an item with nothing",
        ))?;
        Ok(self.ordering(other))
    }

    fn ordering(&self, other: &Item) -> Ordering {
        if self.has_position() {
            self.raw_key.cmp(&other.raw_key)
        } else {
            self.value
                .cmp(&other.value)
                .then_with(|| self.raw_key.cmp(&other.raw_key))
        }
    }
}

/// Sort items in place, stable, using [`Item::compare_to`].
pub fn sort_items(items: &mut [Item]) {
    insertion_sort_by(items, Item::ordering);
}

/// Stable insertion sort that tolerates a comparator which is not a total
/// order; `slice::sort_by` may panic on one.
pub(crate) fn insertion_sort_by<T>(items: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
