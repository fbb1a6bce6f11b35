//! Query-string decoding for `GET /api/toy`.
//!
//! Front-ends encode arrays and nested objects the way `qs` does:
//! `labels[]=a`, `labels[0]=a`, `sortBy[type]=price&sortBy[sortDir]=-1`.
//! Plain repeated keys and a JSON-encoded `sortBy` are accepted too. Every
//! value is normalized to a safe default, so decoding never fails.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::query::{SortBy, SortDir, SortField, ToyFilter};

pub fn parse_filter(pairs: &[(String, String)]) -> ToyFilter {
    let mut filter = ToyFilter::default();

    for (key, value) in pairs {
        match key.as_str() {
            "txt" => filter.txt = value.clone(),
            "inStock" => filter.in_stock = parse_in_stock(value),
            "pageIdx" => filter.page_idx = parse_page_idx(value),
            "sortBy" => {
                if let Some(sort_by) = parse_sort_json(value) {
                    filter.sort_by = sort_by;
                }
            }
            "sortBy[type]" => filter.sort_by.field = SortField::parse(value),
            "sortBy[sortDir]" => filter.sort_by.dir = SortDir::parse(value),
            key if is_labels_key(key) => {
                if !value.is_empty() {
                    filter.labels.push(value.clone());
                }
            }
            _ => {}
        }
    }

    filter
}

/// Only the exact strings `true` and `false` select a stock state.
fn parse_in_stock(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_page_idx(raw: &str) -> usize {
    raw.trim().parse::<usize>().unwrap_or(0)
}

fn is_labels_key(key: &str) -> bool {
    if key == "labels" || key == "labels[]" {
        return true;
    }
    key.strip_prefix("labels[")
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|idx| !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Debug, Deserialize)]
struct RawSortBy {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(rename = "sortDir", default)]
    sort_dir: JsonValue,
}

fn parse_sort_json(raw: &str) -> Option<SortBy> {
    let parsed: RawSortBy = serde_json::from_str(raw).ok()?;
    let dir = match &parsed.sort_dir {
        JsonValue::Number(number) => number
            .as_f64()
            .map(SortDir::from_multiplier)
            .unwrap_or_default(),
        JsonValue::String(text) => SortDir::parse(text),
        _ => SortDir::Asc,
    };
    Some(SortBy {
        field: SortField::parse(&parsed.kind),
        dir,
    })
}
