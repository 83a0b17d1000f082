//! Field extraction over a page snapshot
//!
//! Each semantic field has an ordered list of candidate locators. The first
//! locator whose element yields non-empty text wins; later candidates are
//! never consulted.

mod css_extractor;
mod selectors;

pub use css_extractor::*;
pub use selectors::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Read-only access to a rendered page.
///
/// Both methods look at the first element matching `selector` only.
pub trait PageSnapshot {
    /// Trimmed text content of the first match
    fn select_text(&self, selector: &str) -> Option<String>;

    /// Attribute value of the first match
    fn select_attr(&self, selector: &str, attr: &str) -> Option<String>;
}

/// Single candidate locator for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocatorRepr")]
pub struct Locator {
    /// CSS selector
    pub selector: String,
    /// Accessor: `text` (default) or `attr:<name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocatorRepr {
    Selector(String),
    Full {
        selector: String,
        #[serde(default)]
        accessor: Option<String>,
    },
}

impl From<LocatorRepr> for Locator {
    fn from(repr: LocatorRepr) -> Self {
        match repr {
            LocatorRepr::Selector(selector) => Locator { selector, accessor: None },
            LocatorRepr::Full { selector, accessor } => Locator { selector, accessor },
        }
    }
}

impl Locator {
    pub fn text(selector: &str) -> Self {
        Locator {
            selector: selector.to_string(),
            accessor: None,
        }
    }

    pub fn attr(selector: &str, attr: &str) -> Self {
        Locator {
            selector: selector.to_string(),
            accessor: Some(format!("attr:{attr}")),
        }
    }

    /// Read this locator's target, returning `None` for a miss or blank value
    pub fn read<P: PageSnapshot + ?Sized>(&self, page: &P) -> Option<String> {
        let accessor = self.accessor.as_deref().unwrap_or("text");

        let value = match accessor.strip_prefix("attr:") {
            Some(attr) => page.select_attr(&self.selector, attr),
            None => page.select_text(&self.selector),
        }?;

        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Locator::text(selector)
    }
}

/// Field name -> ordered candidate locators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTable(BTreeMap<String, Vec<Locator>>);

impl FieldTable {
    pub fn new() -> Self {
        FieldTable(BTreeMap::new())
    }

    /// Builder-style insert; replaces any existing candidates for `field`
    pub fn with_field<I, L>(mut self, field: &str, locators: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locator>,
    {
        self.insert(field, locators);
        self
    }

    pub fn insert<I, L>(&mut self, field: &str, locators: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Locator>,
    {
        self.0
            .insert(field.to_string(), locators.into_iter().map(Into::into).collect());
    }

    pub fn locators(&self, field: &str) -> Option<&[Locator]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Locator])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        default_field_table()
    }
}

/// Field name -> raw extracted text, for one page snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawFieldMap(BTreeMap<String, Option<String>>);

impl RawFieldMap {
    /// Raw text for `field`; `None` for a miss or an unknown field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|v| v.as_deref())
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for RawFieldMap {
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        RawFieldMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

/// Resolve every field in `table` against `page`
pub fn extract_fields<P: PageSnapshot + ?Sized>(page: &P, table: &FieldTable) -> RawFieldMap {
    table
        .iter()
        .map(|(field, locators)| (field, extract_field(page, field, locators)))
        .collect()
}

/// First non-empty value among `locators`, tried in order
pub fn extract_field<P: PageSnapshot + ?Sized>(
    page: &P,
    field: &str,
    locators: &[Locator],
) -> Option<String> {
    for (idx, locator) in locators.iter().enumerate() {
        if let Some(value) = locator.read(page) {
            debug!(field, candidate = idx, selector = %locator.selector, "field resolved");
            return Some(value);
        }
        trace!(field, selector = %locator.selector, "locator missed");
    }

    debug!(field, "no locator matched");
    None
}
