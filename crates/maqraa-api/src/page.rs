//! Paged results and the normalization backstop
//!
//! The backend's paged endpoints are inconsistent: `data` can be missing,
//! `items` can be null or a non-list, `totalCount` can be a number, a
//! number-like string, or an undercount of the items actually returned.
//! [`normalize_page`] repairs all of that into a well-formed page before
//! anything downstream sees it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::ApiResponse;

/// A well-formed slice of a larger collection.
///
/// After normalization `items` is always a materialized vector and
/// `total_count` is never smaller than `skip + items.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }
}

/// A paged payload exactly as the backend sends it, before any repair.
///
/// Every field is kept loose on purpose; parsing happens in
/// [`normalize_page`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    #[serde(default)]
    pub total_count: Option<Value>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub skip_count: Option<Value>,
}

/// Parse a loose JSON value as a finite number.
///
/// Accepts numbers and number-like strings; everything else is `None`.
fn parse_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Truncate and clamp a parsed number to a non-negative count.
fn to_count(value: f64) -> u64 {
    let truncated = value.trunc();
    if truncated <= 0.0 { 0 } else { truncated as u64 }
}

/// Repair a raw paged payload into a well-formed page.
///
/// Policy:
/// - an absent payload becomes the empty page;
/// - non-array `items` are coerced to `[]`;
/// - the caller-requested offset wins over the offset echoed by the
///   backend; either is parsed leniently, defaults to 0, and is clamped
///   to >= 0 by truncation;
/// - a parseable `totalCount` is raised to `skip + items.len()` when it
///   undercounts the page just returned; an unparseable one falls back to
///   `skip + items.len()` entirely.
///
/// Total over all plausible malformed input; never returns an error.
pub fn normalize_page(raw: Option<RawPage>, requested_skip: Option<i64>) -> PagedResult<Value> {
    let raw = raw.unwrap_or_default();

    let items = match raw.items {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };

    let skip = requested_skip
        .map(|s| s as f64)
        .or_else(|| parse_number(raw.skip_count.as_ref()))
        .map(to_count)
        .unwrap_or(0);

    let floor = skip + items.len() as u64;
    let total_count = match parse_number(raw.total_count.as_ref()) {
        Some(total) => to_count(total).max(floor),
        None => floor,
    };

    PagedResult { total_count, items }
}

/// [`normalize_page`] lifted over a whole response envelope.
///
/// `is_success` and `errors` pass through untouched; only `data` is
/// replaced, and it is always present afterwards.
pub fn normalize_response(
    response: ApiResponse<RawPage>,
    requested_skip: Option<i64>,
) -> ApiResponse<PagedResult<Value>> {
    let ApiResponse {
        is_success,
        errors,
        data,
    } = response;
    ApiResponse {
        is_success,
        errors,
        data: Some(normalize_page(data, requested_skip)),
    }
}

impl PagedResult<Value> {
    /// Lift a normalized loose page into typed items.
    ///
    /// This is the strict boundary between tolerated backend JSON and the
    /// typed DTOs the rest of the application works with; a single
    /// wrong-shaped item fails the whole page.
    ///
    /// # Errors
    /// Returns the underlying deserialization error for the first item
    /// that does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<PagedResult<T>, serde_json::Error> {
        let items = self
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        Ok(PagedResult {
            total_count: self.total_count,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(total: Value, items: Value) -> RawPage {
        serde_json::from_value(json!({ "totalCount": total, "items": items })).unwrap()
    }

    #[test]
    fn absent_payload_becomes_empty_page() {
        let page = normalize_page(None, Some(20));
        assert_eq!(page, PagedResult { total_count: 20, items: vec![] });

        let page = normalize_page(None, None);
        assert_eq!(page, PagedResult::default());
    }

    #[test]
    fn non_array_items_are_coerced_to_empty() {
        for items in [json!(null), json!({}), json!("oops"), json!(3)] {
            let page = normalize_page(Some(raw(json!(9), items)), Some(0));
            assert!(page.items.is_empty());
            assert_eq!(page.total_count, 9);
        }
    }

    #[test]
    fn undercounted_total_is_raised_to_visible_items() {
        // server claims 3 but sent 5 items at offset 0
        let page = normalize_page(Some(raw(json!(3), json!([1, 2, 3, 4, 5]))), Some(0));
        assert_eq!(page.total_count, 5);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn string_total_is_parsed() {
        let page = normalize_page(Some(raw(json!("42"), json!(["x", "y"]))), Some(40));
        assert_eq!(page.total_count, 42);
    }

    #[test]
    fn embedded_skip_used_when_caller_gives_none() {
        let raw_page: RawPage =
            serde_json::from_value(json!({ "skipCount": 10, "items": [1, 2, 3, 4, 5] })).unwrap();
        let page = normalize_page(Some(raw_page), None);
        assert_eq!(page.total_count, 15);
    }

    #[test]
    fn requested_skip_wins_over_embedded() {
        let raw_page: RawPage =
            serde_json::from_value(json!({ "skipCount": 10, "items": [1, 2] })).unwrap();
        let page = normalize_page(Some(raw_page), Some(30));
        assert_eq!(page.total_count, 32);
    }

    #[test]
    fn negative_and_garbage_offsets_clamp_to_zero() {
        let page = normalize_page(Some(raw(json!(null), json!([1]))), Some(-5));
        assert_eq!(page.total_count, 1);

        let raw_page: RawPage =
            serde_json::from_value(json!({ "skipCount": "junk", "items": [1] })).unwrap();
        let page = normalize_page(Some(raw_page), None);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn total_never_below_skip_plus_items() {
        for (total, skip, len) in [
            (json!(0), 0i64, 4usize),
            (json!(100), 90, 20),
            (json!(-7), 3, 2),
            (json!("not a number"), 12, 1),
        ] {
            let items: Vec<Value> = (0..len).map(|i| json!(i)).collect();
            let page = normalize_page(Some(raw(total, Value::Array(items))), Some(skip));
            assert!(page.total_count >= skip as u64 + len as u64);
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_page(Some(raw(json!(3), json!([1, 2, 3, 4, 5]))), Some(0));

        // feed the already-consistent page back through
        let again = normalize_page(
            Some(raw(
                json!(first.total_count),
                Value::Array(first.items.clone()),
            )),
            Some(0),
        );
        assert_eq!(first, again);
    }

    #[test]
    fn envelope_fields_pass_through() {
        let response: ApiResponse<RawPage> = serde_json::from_value(json!({
            "isSuccess": true,
            "errors": [],
            "data": { "totalCount": 1, "items": [ { "id": 1 } ] }
        }))
        .unwrap();

        let normalized = normalize_response(response, Some(0));
        assert!(normalized.is_success);
        assert_eq!(normalized.data.unwrap().total_count, 1);
    }

    #[test]
    fn decode_lifts_items_into_typed_rows() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Row {
            id: u32,
        }

        let page = normalize_page(
            Some(raw(json!(2), json!([{ "id": 1 }, { "id": 2 }]))),
            Some(0),
        );
        let typed: PagedResult<Row> = page.decode().unwrap();
        assert_eq!(typed.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(typed.total_count, 2);
    }

    #[test]
    fn decode_rejects_wrong_shaped_items() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Row {
            id: u32,
        }

        let page = normalize_page(
            Some(raw(json!(2), json!([{ "id": 1 }, "not a row"]))),
            Some(0),
        );
        assert!(page.decode::<Row>().is_err());
    }
}
