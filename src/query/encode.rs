//! Nested bracket encoding for [`QueryParams`].

use super::{QueryParams, QueryValue};

/// Encodes `params` into a query string such as
/// `filter[field][condition][path]=value&include=a,b`.
///
/// Keys and values are percent-encoded; brackets and commas are kept
/// literal. Lists use numeric indices. Empty maps and lists emit nothing.
#[must_use]
pub fn encode(params: &QueryParams) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params.entries() {
        push_pairs(&mut pairs, escape(key), value);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, prefix: String, value: &QueryValue) {
    match value {
        QueryValue::Scalar(scalar) => pairs.push(format!("{prefix}={}", escape(scalar))),
        QueryValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, format!("{prefix}[{index}]"), item);
            }
        }
        QueryValue::Map(entries) => {
            for (key, child) in entries {
                push_pairs(pairs, format!("{prefix}[{}]", escape(key)), child);
            }
        }
    }
}

fn escape(raw: &str) -> String {
    urlencoding::encode(raw).replace("%2C", ",")
}
