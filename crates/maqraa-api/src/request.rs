//! List filter descriptor and query-parameter marshaling

use serde::{Deserialize, Serialize};

/// Query-parameter key casing used by a list endpoint.
///
/// Most endpoints take PascalCase keys (`SkipCount`, `SearchTerm`); a few
/// older ones take camelCase. The inconsistency is a property of the
/// deployed backend and is preserved per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamCasing {
    Pascal,
    Camel,
}

/// Sort order for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Client-side descriptor of one filtered list query.
///
/// All fields are optional; only defined fields (and for strings,
/// non-empty ones) become query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRequest {
    /// Offset into the collection, >= 0.
    pub skip_count: Option<u64>,
    /// Page size, > 0.
    pub max_result_count: Option<u64>,
    /// Free-text search.
    pub search_term: Option<String>,
    /// Opaque `key=value` narrowing string, e.g. `inactive=true`.
    pub filter: Option<String>,
    /// Response language.
    pub lang: Option<String>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl ListRequest {
    /// Position the request at `page_index * page_size`.
    #[must_use]
    pub fn page(mut self, page_index: u64, page_size: u64) -> Self {
        self.skip_count = Some(page_index * page_size);
        self.max_result_count = Some(page_size);
        self
    }

    /// Emit one query pair per defined field under the given casing.
    pub fn query_pairs(&self, casing: ParamCasing) -> Vec<(&'static str, String)> {
        let key = |pascal: &'static str, camel: &'static str| match casing {
            ParamCasing::Pascal => pascal,
            ParamCasing::Camel => camel,
        };

        let mut pairs = Vec::new();
        if let Some(skip) = self.skip_count {
            pairs.push((key("SkipCount", "skipCount"), skip.to_string()));
        }
        if let Some(max) = self.max_result_count {
            pairs.push((key("MaxResultCount", "maxResultCount"), max.to_string()));
        }
        if let Some(term) = defined(&self.search_term) {
            pairs.push((key("SearchTerm", "searchTerm"), term.to_string()));
        }
        if let Some(filter) = defined(&self.filter) {
            pairs.push((key("Filter", "filter"), filter.to_string()));
        }
        if let Some(lang) = defined(&self.lang) {
            pairs.push((key("Lang", "lang"), lang.to_string()));
        }
        if let Some(sort_by) = defined(&self.sort_by) {
            pairs.push((key("SortBy", "sortBy"), sort_by.to_string()));
        }
        if let Some(direction) = self.sort_direction {
            pairs.push((
                key("SortingDirection", "sortingDirection"),
                direction.as_str().to_string(),
            ));
        }
        pairs
    }
}

/// A string field counts as defined only when present and non-empty.
fn defined(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_emits_no_pairs() {
        assert!(ListRequest::default().query_pairs(ParamCasing::Pascal).is_empty());
    }

    #[test]
    fn empty_strings_are_not_defined() {
        let request = ListRequest {
            search_term: Some(String::new()),
            filter: Some(String::new()),
            ..ListRequest::default()
        };
        assert!(request.query_pairs(ParamCasing::Pascal).is_empty());
    }

    #[test]
    fn pascal_and_camel_key_sets() {
        let request = ListRequest {
            search_term: Some("ahmad".to_string()),
            sort_by: Some("name".to_string()),
            sort_direction: Some(SortDirection::Desc),
            ..ListRequest::default()
        }
        .page(2, 25);

        let pascal = request.query_pairs(ParamCasing::Pascal);
        assert_eq!(
            pascal,
            vec![
                ("SkipCount", "50".to_string()),
                ("MaxResultCount", "25".to_string()),
                ("SearchTerm", "ahmad".to_string()),
                ("SortBy", "name".to_string()),
                ("SortingDirection", "desc".to_string()),
            ]
        );

        let camel: Vec<&str> = request
            .query_pairs(ParamCasing::Camel)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            camel,
            vec!["skipCount", "maxResultCount", "searchTerm", "sortBy", "sortingDirection"]
        );
    }

    #[test]
    fn opaque_filter_string_passes_through_verbatim() {
        let request = ListRequest {
            filter: Some("inactive=true".to_string()),
            ..ListRequest::default()
        };
        assert_eq!(
            request.query_pairs(ParamCasing::Pascal),
            vec![("Filter", "inactive=true".to_string())]
        );
    }
}
