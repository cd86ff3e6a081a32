//! Extended link codec.
//!
//! An extended link packs four things into one string: the node it points
//! at (a repository path or a UUID), a chain of `~`-delimited selectors, a
//! query string and an anchor fragment.
//!
//! ```text
//! /content/page~page=2~print~.html?lang=de#comments
//! └────base────┘└──selectors──┘    └─query─┘└anchor┘
//! ```
//!
//! Selectors sit in front of the file extension of the last path segment,
//! so the base recovered by [`parse`] keeps its extension
//! (`/content/page.html` above).
//!
//! ## Classification
//!
//! [`classify`] looks only at fixed prefixes:
//!
//! | Prefix | Kind |
//! |--------|------|
//! | `http://`, `https://` (any case) | [`LinkKind::External`], never decomposed |
//! | `#` | [`LinkKind::Anchor`], no base |
//! | `/` | [`LinkKind::Path`] |
//! | 36-char lowercase UUID | [`LinkKind::Uuid`] |
//! | anything else | [`LinkKind::Unparsable`], no components |
//!
//! ## Round Trip
//!
//! For well-formed path and UUID links, `parse(s).to_link() == s`. External
//! links and pure anchors pass through unchanged. Nothing in this module
//! returns an error: unparsable input yields empty components and callers
//! fall back to the raw string.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Delimiter between the base and each selector segment.
pub const SELECTOR_DELIMITER: char = '~';

const UUID_LEN: usize = 36;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]{8}-[a-z0-9]{4}-[a-z0-9]{4}-[a-z0-9]{4}-[a-z0-9]{12}$")
        .expect("uuid pattern must compile")
});

/// What the base of a link refers to, decided by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    External,
    Anchor,
    Path,
    Uuid,
    Unparsable,
}

impl LinkKind {
    /// Whether [`parse`] splits links of this kind into components.
    pub fn is_decomposable(self) -> bool {
        matches!(self, Self::Anchor | Self::Path | Self::Uuid)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::External => "external",
            Self::Anchor => "anchor",
            Self::Path => "path",
            Self::Uuid => "uuid",
            Self::Unparsable => "unparsable",
        };
        f.write_str(name)
    }
}

/// The four parts of an extended link.
///
/// Blank parts are always `None`; `selectors` never starts or ends with
/// [`SELECTOR_DELIMITER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl LinkComponents {
    /// True when no part is present.
    pub fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.selectors.is_none()
            && self.query.is_none()
            && self.anchor.is_none()
    }

    /// Recompose the link from its parts.
    pub fn to_link(&self) -> String {
        merge(
            self.base.as_deref(),
            self.selectors.as_deref(),
            self.query.as_deref(),
            self.anchor.as_deref(),
        )
    }

    /// Recompose everything except the base.
    pub fn to_link_without_base(&self) -> String {
        merge(
            None,
            self.selectors.as_deref(),
            self.query.as_deref(),
            self.anchor.as_deref(),
        )
    }
}

impl fmt::Display for LinkComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_link())
    }
}

/// Classify a raw link by its prefix.
///
/// A UUID only counts when the 36 characters are followed by nothing or by
/// the start of another component (`~`, `.`, `?`, `#`), so
/// `"dc307c08-5a19-4260-a304-a5611d1ca900 1"` is unparsable.
pub fn classify(raw: &str) -> LinkKind {
    let kind = if is_external(raw) {
        LinkKind::External
    } else if raw.starts_with('#') {
        LinkKind::Anchor
    } else if raw.starts_with('/') {
        LinkKind::Path
    } else if starts_with_uuid(raw) {
        LinkKind::Uuid
    } else {
        LinkKind::Unparsable
    };
    log::trace!("classified {raw:?} as {kind}");
    kind
}

/// Whether `candidate` is exactly one lowercase UUID.
pub fn is_uuid(candidate: &str) -> bool {
    UUID_RE.is_match(candidate)
}

fn is_external(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

fn starts_with_uuid(raw: &str) -> bool {
    let Some(head) = raw.get(..UUID_LEN) else {
        return false;
    };
    if !is_uuid(head) {
        return false;
    }
    match raw[UUID_LEN..].chars().next() {
        None => true,
        Some(next) => matches!(next, SELECTOR_DELIMITER | '.' | '?' | '#'),
    }
}

/// Split a raw link into its components.
///
/// External links come back whole in `base`; unparsable input comes back
/// with every part empty.
pub fn parse(raw: &str) -> LinkComponents {
    match classify(raw) {
        LinkKind::External => LinkComponents {
            base: Some(raw.to_string()),
            ..LinkComponents::default()
        },
        LinkKind::Path | LinkKind::Anchor => decompose(raw, false),
        LinkKind::Uuid => decompose(&format!("/{raw}"), true),
        LinkKind::Unparsable => {
            log::debug!("no components in unparsable link {raw:?}");
            LinkComponents::default()
        }
    }
}

/// `synthetic_slash` marks a leading `/` that [`parse`] added to a UUID
/// link; it is dropped from the recovered base whatever follows the UUID.
fn decompose(link: &str, synthetic_slash: bool) -> LinkComponents {
    let (rest, anchor) = match link.split_once('#') {
        Some((rest, anchor)) => (rest, Some(anchor)),
        None => (link, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let (path, selectors) = split_selectors(path);
    let base = if synthetic_slash {
        path.strip_prefix('/').unwrap_or(path.as_str()).to_string()
    } else {
        collapse_uuid(&path)
    };

    LinkComponents {
        base: non_blank(Some(base.as_str())),
        selectors,
        query: non_blank(query),
        anchor: non_blank(anchor),
    }
}

/// Separate the selector block from a query- and anchor-free path.
///
/// Returns the path with the block removed and the interior segments joined
/// by the delimiter. A path without a complete block is returned untouched.
fn split_selectors(path: &str) -> (String, Option<String>) {
    let Some((head, tail)) = path.split_once(SELECTOR_DELIMITER) else {
        return (path.to_string(), None);
    };

    let mut segments = Vec::new();
    let mut rest = tail;
    while contains_more_selectors(rest) {
        let Some((segment, next)) = rest.split_once(SELECTOR_DELIMITER) else {
            break;
        };
        if !segment.is_empty() {
            segments.push(segment);
        }
        rest = next;
    }

    if segments.is_empty() {
        return (path.to_string(), None);
    }
    let delimiter = SELECTOR_DELIMITER.to_string();
    (format!("{head}{rest}"), Some(segments.join(delimiter.as_str())))
}

/// True while `fragment` still holds a selector segment: it has another
/// delimiter and has not reached the file extension.
pub fn contains_more_selectors(fragment: &str) -> bool {
    !fragment.starts_with('.') && fragment.contains(SELECTOR_DELIMITER)
}

fn collapse_uuid(base: &str) -> String {
    match base.strip_prefix('/') {
        Some(id) if is_uuid(id) => id.to_string(),
        _ => base.to_string(),
    }
}

fn non_blank(part: Option<&str>) -> Option<String> {
    part.filter(|p| !p.trim().is_empty()).map(str::to_string)
}

/// Compose a link from its parts; blank parts are left out.
///
/// Selectors go in front of the extension of the last path segment (or at
/// the end when there is none), then `?query`, then `#anchor`.
pub fn merge(
    base: Option<&str>,
    selectors: Option<&str>,
    query: Option<&str>,
    anchor: Option<&str>,
) -> String {
    let mut link = base.unwrap_or_default().to_string();

    let selectors = selectors
        .map(|s| s.trim_matches(SELECTOR_DELIMITER))
        .filter(|s| !s.trim().is_empty());
    if let Some(selectors) = selectors {
        let at = extension_boundary(&link);
        link.insert_str(
            at,
            &format!("{SELECTOR_DELIMITER}{selectors}{SELECTOR_DELIMITER}"),
        );
    }
    if let Some(query) = non_blank(query) {
        link.push('?');
        link.push_str(&query);
    }
    if let Some(anchor) = non_blank(anchor) {
        link.push('#');
        link.push_str(&anchor);
    }
    link
}

/// Byte offset of the last `.` in the final path segment, or the end.
fn extension_boundary(link: &str) -> usize {
    let segment_start = link.rfind('/').map_or(0, |i| i + 1);
    link[segment_start..]
        .rfind('.')
        .map_or(link.len(), |i| segment_start + i)
}

/// Every component of `raw` except its base.
pub fn strip_base(raw: &str) -> String {
    parse(raw).to_link_without_base()
}

/// The base of `raw`, if it has one.
pub fn base_of(raw: &str) -> Option<String> {
    parse(raw).base
}

/// The selector chain of `raw`, if it has one.
pub fn selectors_of(raw: &str) -> Option<String> {
    parse(raw).selectors
}

pub fn query_of(raw: &str) -> Option<String> {
    parse(raw).query
}

pub fn anchor_of(raw: &str) -> Option<String> {
    parse(raw).anchor
}
