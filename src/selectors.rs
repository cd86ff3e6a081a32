//! Selector chain manipulation.
//!
//! A selector chain is the interior of a link's `~...~` block, e.g.
//! `page=2~print~lang=de`. Each segment is either `key=value` or a bare
//! flag `key`. Order is significant and preserved.
//!
//! Keys and values set through this module may not contain the characters
//! that end a selector segment or block (`~`, `?`, `#`). Keys also may not
//! contain `=` or start with `.`, which would read back as a file
//! extension.

use crate::link::{self, LinkKind, SELECTOR_DELIMITER};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid selector key {0:?}")]
    InvalidKey(String),
    #[error("invalid value {value:?} for selector {key:?}")]
    InvalidValue { key: String, value: String },
}

const RESERVED: [char; 3] = [SELECTOR_DELIMITER, '?', '#'];

fn check_key(key: &str) -> Result<(), SelectorError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && !key.contains('=')
        && !key.contains(RESERVED);
    if valid {
        Ok(())
    } else {
        Err(SelectorError::InvalidKey(key.to_string()))
    }
}

fn check_value(key: &str, value: &str) -> Result<(), SelectorError> {
    if value.contains(RESERVED) {
        return Err(SelectorError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// One segment of a selector chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub key: String,
    /// `None` for a bare flag like `print`.
    pub value: Option<String>,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

/// Ordered selector chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    entries: Vec<Selector>,
}

impl Selectors {
    /// Parse a chain like `page=2~print`. Empty segments and segments with
    /// an empty key are skipped.
    pub fn parse(chain: &str) -> Self {
        let entries = chain
            .split(SELECTOR_DELIMITER)
            .filter_map(|segment| {
                let (key, value) = match segment.split_once('=') {
                    Some((key, value)) => (key, Some(value.to_string())),
                    None => (segment, None),
                };
                (!key.is_empty()).then(|| Selector {
                    key: key.to_string(),
                    value,
                })
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Selector> {
        self.entries.iter().find(|s| s.key == key)
    }

    /// Value of `key`; flags have no value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|s| s.value.as_deref())
    }

    /// Set `key=value`, replacing an existing entry in place or appending.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SelectorError> {
        check_key(key)?;
        check_value(key, value)?;
        self.upsert(key, Some(value.to_string()));
        Ok(())
    }

    /// Set the bare flag `key`, replacing an existing entry in place.
    pub fn set_flag(&mut self, key: &str) -> Result<(), SelectorError> {
        check_key(key)?;
        self.upsert(key, None);
        Ok(())
    }

    fn upsert(&mut self, key: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|s| s.key == key) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Selector {
                key: key.to_string(),
                value,
            }),
        }
    }

    /// Remove every entry for `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.key != key);
        self.entries.len() != before
    }
}

impl fmt::Display for Selectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "{SELECTOR_DELIMITER}")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

/// A single change applied by [`update_selectors`].
///
/// `Set` and `Flag` are checked when applied; see the module docs for the
/// characters they reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorUpdate<'a> {
    Set(&'a str, &'a str),
    Flag(&'a str),
    Remove(&'a str),
}

impl<'a> SelectorUpdate<'a> {
    /// Read a command-line style argument: `key=value` sets, `key` flags.
    pub fn from_assignment(arg: &'a str) -> Self {
        match arg.split_once('=') {
            Some((key, value)) => Self::Set(key, value),
            None => Self::Flag(arg),
        }
    }
}

/// Apply `updates` to the selector chain of `raw` and recompose the link.
///
/// Only path and UUID links carry selectors; anything else is returned
/// unchanged. Fails without a partial result if any update is rejected.
pub fn update_selectors(
    raw: &str,
    updates: &[SelectorUpdate<'_>],
) -> Result<String, SelectorError> {
    let kind = link::classify(raw);
    if !accepts_selectors(kind) {
        log::debug!("not updating selectors of {kind} link {raw:?}");
        return Ok(raw.to_string());
    }

    let mut parts = link::parse(raw);
    let mut selectors = parts
        .selectors
        .as_deref()
        .map(Selectors::parse)
        .unwrap_or_default();
    for update in updates {
        match *update {
            SelectorUpdate::Set(key, value) => selectors.set(key, value)?,
            SelectorUpdate::Flag(key) => selectors.set_flag(key)?,
            SelectorUpdate::Remove(key) => {
                selectors.remove(key);
            }
        }
    }
    parts.selectors = (!selectors.is_empty()).then(|| selectors.to_string());
    Ok(parts.to_link())
}

/// Convenience for the common single-key case; `None` removes the key.
pub fn with_selector(
    raw: &str,
    key: &str,
    value: Option<&str>,
) -> Result<String, SelectorError> {
    let update = match value {
        Some(value) => SelectorUpdate::Set(key, value),
        None => SelectorUpdate::Remove(key),
    };
    update_selectors(raw, &[update])
}

/// True if `kind` links can carry selectors at all.
pub fn accepts_selectors(kind: LinkKind) -> bool {
    matches!(kind, LinkKind::Path | LinkKind::Uuid)
}
