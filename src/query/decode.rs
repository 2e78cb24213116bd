//! Parsing of bracket-encoded query strings back into [`QueryParams`].

use thiserror::Error;

use super::{QueryParams, QueryValue};

/// Error returned when a query string cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A key or value is not valid percent-encoded UTF-8.
    #[error("Invalid percent-encoding in query component '{component}'")]
    InvalidEncoding {
        /// The raw component that failed to decode.
        component: String,
    },
}

/// Decodes a query string (with or without a leading `?`).
///
/// Bracketed keys become nested maps; nested maps whose keys are exactly
/// `0..n` in order become lists, and `key[]` appends to a list. A repeated
/// scalar key keeps the last value.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidEncoding`] for malformed percent-encoding.
///
/// # Example
///
/// ```rust
/// use drupal_fetch::query::{decode, QueryParams};
///
/// let params = QueryParams::new().add_filter("field", "title");
/// assert_eq!(decode(&params.to_query_string()).unwrap(), params);
/// ```
pub fn decode(query: &str) -> Result<QueryParams, DecodeError> {
    let mut root = QueryValue::Map(Vec::new());

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let segments = split_key(raw_key)
            .into_iter()
            .map(unescape)
            .collect::<Result<Vec<_>, _>>()?;
        let value = unescape(raw_value)?;

        let mut node = &mut root;
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };
        for segment in parents {
            node = child(node, segment);
        }
        *child(node, last) = QueryValue::Scalar(value);
    }

    // Top-level keys are parameter names, even when they look like indices.
    let mut params = QueryParams::new();
    if let QueryValue::Map(entries) = root {
        for (key, value) in entries {
            params.insert(key, normalize(value));
        }
    }
    Ok(params)
}

/// Splits `a[b][c]` into `["a", "b", "c"]`; unbalanced brackets stay in the key.
fn split_key(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    if open == 0 || !key.ends_with(']') {
        return vec![key];
    }

    let mut segments = vec![&key[..open]];
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            return vec![key];
        };
        segments.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }
    if rest.is_empty() {
        segments
    } else {
        vec![key]
    }
}

fn unescape(raw: &str) -> Result<String, DecodeError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| DecodeError::InvalidEncoding {
            component: raw.to_string(),
        })
}

/// Returns the child of `node` under `segment`, creating it when missing.
/// An empty segment appends a new slot.
fn child<'a>(node: &'a mut QueryValue, segment: &str) -> &'a mut QueryValue {
    if !matches!(node, QueryValue::Map(_)) {
        *node = QueryValue::Map(Vec::new());
    }
    let QueryValue::Map(entries) = node else {
        unreachable!("node was just replaced with a map")
    };

    let key = if segment.is_empty() {
        entries.len().to_string()
    } else {
        segment.to_string()
    };
    let index = match entries.iter().position(|(k, _)| *k == key) {
        Some(index) => index,
        None => {
            entries.push((key, QueryValue::Map(Vec::new())));
            entries.len() - 1
        }
    };
    &mut entries[index].1
}

fn normalize(value: QueryValue) -> QueryValue {
    match value {
        QueryValue::Map(entries) => {
            let sequential = !entries.is_empty()
                && entries
                    .iter()
                    .enumerate()
                    .all(|(index, (key, _))| *key == index.to_string());
            let entries = entries
                .into_iter()
                .map(|(key, child)| (key, normalize(child)));
            if sequential {
                QueryValue::List(entries.map(|(_, child)| child).collect())
            } else {
                QueryValue::Map(entries.collect())
            }
        }
        other => other,
    }
}
