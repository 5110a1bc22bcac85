//! List options and page cursors for paginated WHOOP collections.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// Optional parameters accepted by the collection `List` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of items per page. The API caps this at 50.
    pub limit: Option<u32>,
    /// Earliest record time to fetch, inclusive.
    pub start: Option<DateTime<Utc>>,
    /// Latest record time to fetch, inclusive.
    pub end: Option<DateTime<Utc>>,
    /// Cursor for the next page, as returned in [`Page::next_token`].
    pub next_token: Option<String>,
}

impl ListOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the earliest record time, inclusive.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the latest record time, inclusive.
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the next-page cursor.
    pub fn next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    fn query_string(&self) -> Option<String> {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(start) = self.start {
            query.append_pair("start", &start.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        if let Some(end) = self.end {
            query.append_pair("end", &end.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        if let Some(token) = self.next_token.as_deref().filter(|t| !t.is_empty()) {
            query.append_pair("nextToken", token);
        }

        let encoded = query.finish();
        if encoded.is_empty() {
            None
        } else {
            Some(encoded)
        }
    }
}

/// Append the encoded options, if any, to an endpoint path.
pub(crate) fn paged_path(path: &str, opts: &ListOptions) -> String {
    match opts.query_string() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

/// One page of a paginated WHOOP collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The records in this page.
    #[serde(default)]
    pub records: Vec<T>,
    /// Cursor for the following page; absent or empty on the last page.
    #[serde(default)]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Whether a following page exists.
    pub fn has_next(&self) -> bool {
        self.next_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Options for fetching the page after this one, carrying over the
    /// original filters. Returns `None` on the last page.
    pub fn next_options(&self, current: &ListOptions) -> Option<ListOptions> {
        let token = self.next_token.as_deref().filter(|t| !t.is_empty())?;
        let mut opts = current.clone();
        opts.next_token = Some(token.to_string());
        Some(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_options_add_no_query() {
        assert_eq!(paged_path("/cycle", &ListOptions::new()), "/cycle");
    }

    #[test]
    fn test_all_options_encoded() {
        let opts = ListOptions::new()
            .limit(25)
            .start(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
            .end(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap())
            .next_token("abc123");

        let path = paged_path("/activity/sleep", &opts);
        assert!(path.starts_with("/activity/sleep?"));
        assert!(path.contains("limit=25"));
        assert!(path.contains("start=2024-01-02T03%3A04%3A05Z"));
        assert!(path.contains("end=2024-02-03T04%3A05%3A06Z"));
        assert!(path.contains("nextToken=abc123"));
    }

    #[test]
    fn test_empty_next_token_omitted() {
        let opts = ListOptions::new().next_token("");
        assert_eq!(paged_path("/cycle", &opts), "/cycle");
    }

    #[test]
    fn test_next_options_threads_token_and_filters() {
        let page: Page<u32> = Page {
            records: vec![1, 2, 3],
            next_token: Some("cursor-2".to_string()),
        };
        let current = ListOptions::new().limit(10);

        let next = page.next_options(&current).unwrap();
        assert_eq!(next.limit, Some(10));
        assert_eq!(next.next_token.as_deref(), Some("cursor-2"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let empty: Page<u32> = Page {
            records: vec![],
            next_token: None,
        };
        assert!(!empty.has_next());
        assert!(empty.next_options(&ListOptions::new()).is_none());

        let blank: Page<u32> = Page {
            records: vec![],
            next_token: Some(String::new()),
        };
        assert!(!blank.has_next());
    }

    #[test]
    fn test_page_deserializes_wire_shape() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"records":[7,8],"next_token":"tok"}"#).unwrap();
        assert_eq!(page.records, vec![7, 8]);
        assert!(page.has_next());

        let last: Page<u32> = serde_json::from_str(r#"{"records":[]}"#).unwrap();
        assert!(!last.has_next());
    }
}
