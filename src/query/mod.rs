//! Structured JSON:API query parameters.
//!
//! JSON:API filtering, sparse fieldsets, sorting, paging and includes are
//! expressed as nested query keys (`filter[title][condition][path]=title`).
//! [`QueryParams`] keeps those parameters as an insertion-ordered tree of
//! [`QueryValue`]s and offers builder helpers matching the conventions of
//! the Drupal JSON:API module.
//!
//! # Example
//!
//! ```rust
//! use drupal_fetch::query::QueryParams;
//!
//! let params = QueryParams::new()
//!     .add_filter("status", "1")
//!     .add_include(["field_image", "uid"])
//!     .add_sort("created", true)
//!     .add_page_limit(10);
//!
//! assert_eq!(
//!     params.to_query_string(),
//!     "filter[status]=1&include=field_image,uid&sort=-created&page[limit]=10"
//! );
//! ```

mod decode;
mod encode;

pub use decode::{decode, DecodeError};
pub use encode::encode;

use std::fmt;

/// A node in a nested query parameter tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A leaf value.
    Scalar(String),
    /// An ordered list, encoded with numeric indices (`key[0]=a`).
    List(Vec<QueryValue>),
    /// An insertion-ordered map of named children.
    Map(Vec<(String, QueryValue)>),
}

impl QueryValue {
    /// Returns the leaf value, if this is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the child stored under `key`, if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    fn map_entry(&mut self, key: &str) -> &mut Self {
        if !matches!(self, Self::Map(_)) {
            *self = Self::Map(Vec::new());
        }
        let Self::Map(entries) = self else {
            unreachable!("value was just replaced with a map")
        };
        let index = match entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                entries.push((key.to_string(), Self::Map(Vec::new())));
                entries.len() - 1
            }
        };
        &mut entries[index].1
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl<V: Into<Self>> From<Vec<V>> for QueryValue {
    fn from(values: Vec<V>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Operators whose filter value is a list rather than a single value.
const MULTI_VALUE_OPERATORS: &[&str] = &["IN", "NOT IN", "BETWEEN", "NOT BETWEEN"];

/// Insertion-ordered JSON:API query parameters.
///
/// Builder methods consume and return `self`; [`QueryParams::insert`]
/// mutates in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the top-level entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(String, QueryValue)] {
        &self.entries
    }

    /// Returns the top-level value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Sets a top-level value, replacing any existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Sets a value at a nested path such as `["page", "limit"]`.
    fn insert_path(&mut self, path: &[&str], value: QueryValue) {
        let Some((first, rest)) = path.split_first() else {
            return;
        };
        if rest.is_empty() {
            self.insert(*first, value);
            return;
        }
        if self.get(first).is_none() {
            self.entries
                .push(((*first).to_string(), QueryValue::Map(Vec::new())));
        }
        let Some((_, root)) = self.entries.iter_mut().find(|(k, _)| k == first) else {
            return;
        };
        let Some((last, middle)) = rest.split_last() else {
            return;
        };
        let mut node = root;
        for segment in middle {
            node = node.map_entry(segment);
        }
        *node.map_entry(last) = value;
    }

    /// Appends `item` to a comma-separated top-level value, skipping duplicates.
    fn append_csv(&mut self, key: &str, item: &str) {
        let mut items: Vec<String> = self
            .get(key)
            .and_then(QueryValue::as_str)
            .filter(|existing| !existing.is_empty())
            .map(|existing| existing.split(',').map(String::from).collect())
            .unwrap_or_default();
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
        self.insert(key, items.join(","));
    }

    /// Adds a shorthand equality filter: `filter[path]=value`.
    #[must_use]
    pub fn add_filter(mut self, path: &str, value: impl Into<QueryValue>) -> Self {
        self.insert_path(&["filter", path], value.into());
        self
    }

    /// Adds a condition filter with an explicit operator and optional group.
    ///
    /// The condition is named after its path. Multi-value operators
    /// (`IN`, `BETWEEN`, ...) store the value as an indexed list.
    ///
    /// ```rust
    /// use drupal_fetch::query::QueryParams;
    ///
    /// let params = QueryParams::new().add_filter_with(
    ///     "created",
    ///     vec!["1700000000", "1800000000"],
    ///     "BETWEEN",
    ///     None,
    /// );
    /// assert_eq!(
    ///     params.to_query_string(),
    ///     "filter[created][condition][path]=created\
    ///      &filter[created][condition][operator]=BETWEEN\
    ///      &filter[created][condition][value][0]=1700000000\
    ///      &filter[created][condition][value][1]=1800000000"
    /// );
    /// ```
    #[must_use]
    pub fn add_filter_with(
        mut self,
        path: &str,
        value: impl Into<QueryValue>,
        operator: &str,
        member_of: Option<&str>,
    ) -> Self {
        let mut value = value.into();
        if MULTI_VALUE_OPERATORS.contains(&operator) {
            if let QueryValue::Scalar(single) = value {
                value = QueryValue::List(vec![QueryValue::Scalar(single)]);
            }
        }

        let mut condition = vec![
            ("path".to_string(), QueryValue::from(path)),
            ("operator".to_string(), QueryValue::from(operator)),
        ];
        if !matches!(operator, "IS NULL" | "IS NOT NULL") {
            condition.push(("value".to_string(), value));
        }
        if let Some(group) = member_of {
            condition.push(("memberOf".to_string(), QueryValue::from(group)));
        }

        self.insert_path(&["filter", path, "condition"], QueryValue::Map(condition));
        self
    }

    /// Adds a filter group with the given conjunction (`AND` / `OR`).
    #[must_use]
    pub fn add_group(mut self, name: &str, conjunction: &str, member_of: Option<&str>) -> Self {
        let mut group = vec![("conjunction".to_string(), QueryValue::from(conjunction))];
        if let Some(parent) = member_of {
            group.push(("memberOf".to_string(), QueryValue::from(parent)));
        }
        self.insert_path(&["filter", name, "group"], QueryValue::Map(group));
        self
    }

    /// Adds relationship paths to the `include` parameter.
    #[must_use]
    pub fn add_include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.append_csv("include", path.as_ref());
        }
        self
    }

    /// Adds a sort field; descending fields are prefixed with `-`.
    #[must_use]
    pub fn add_sort(mut self, path: &str, descending: bool) -> Self {
        let field = if descending {
            format!("-{path}")
        } else {
            path.to_string()
        };
        self.append_csv("sort", &field);
        self
    }

    /// Sets `page[limit]`.
    #[must_use]
    pub fn add_page_limit(mut self, limit: u64) -> Self {
        self.insert_path(&["page", "limit"], limit.into());
        self
    }

    /// Sets `page[offset]`.
    #[must_use]
    pub fn add_page_offset(mut self, offset: u64) -> Self {
        self.insert_path(&["page", "offset"], offset.into());
        self
    }

    /// Restricts the attributes returned for `resource_type` (sparse fieldset).
    #[must_use]
    pub fn add_fields<I, S>(mut self, resource_type: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<String> = fields.into_iter().map(|f| f.as_ref().to_string()).collect();
        self.insert_path(&["fields", resource_type], fields.join(",").into());
        self
    }

    /// Adds an arbitrary top-level parameter.
    #[must_use]
    pub fn add_custom_param(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Encodes the parameters into a query string without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        encode(self)
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
