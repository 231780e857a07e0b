//! URL query-parameter codec shared by the list pages.
//!
//! Conventions carried over from the dashboard URLs:
//! - `page` / `perPage` — zero when absent, the server clamps;
//! - `sort` / `order` — see `ipcman_state::sort`;
//! - ID-list filters are dot-delimited (`device=1.2.3`);
//! - string-list filters are JSON arrays (`alarmEvents=["x","y"]`).

use ipcman_state::{PagePagination, SortState};

/// Parsed query string, order-preserving: `page=2&device=1.2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parse a query string (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        Self(
            query
                .split('&')
                .filter(|s| !s.is_empty())
                .filter_map(|pair| {
                    let (k, v) = pair.split_once('=')?;
                    Some((k.to_string(), v.to_string()))
                })
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a key, replacing any previous value. An empty value removes
    /// the key, so cleared filters drop out of the URL entirely.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        self.0.retain(|(k, _)| k != key);
        if !value.is_empty() {
            self.0.push((key.to_string(), value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode with a leading `?`, or empty when there are no params.
    pub fn encode(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let joined = self
            .0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }

    // ── typed helpers ──

    pub fn get_i32(&self, key: &str) -> i32 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }

    /// `page`/`perPage` pair; zero when absent.
    pub fn page(&self) -> PagePagination {
        PagePagination::new(self.get_i32("page"), self.get_i32("perPage"))
    }

    pub fn set_page(&mut self, page: PagePagination) {
        self.set("page", non_zero(page.page));
        self.set("perPage", non_zero(page.per_page));
    }

    /// `sort`/`order` pair.
    pub fn sort(&self) -> SortState {
        SortState::from_query(self.get("sort"), self.get("order"))
    }

    pub fn set_sort(&mut self, sort: &SortState) {
        match sort.to_query() {
            Some((field, order)) => {
                let field = field.to_string();
                self.set("sort", field);
                self.set("order", order);
            }
            None => {
                self.set("sort", "");
                self.set("order", "");
            }
        }
    }
}

fn non_zero(v: i32) -> String {
    if v == 0 {
        String::new()
    } else {
        v.to_string()
    }
}

/// Encode an ID list as a dot-delimited token.
pub fn dot_encode(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Decode a dot-delimited ID list; malformed segments are skipped.
pub fn dot_decode(token: Option<&str>) -> Vec<i64> {
    token
        .map(|t| t.split('.').filter_map(|v| v.parse().ok()).collect())
        .unwrap_or_default()
}

/// Decode a JSON string-array filter; anything malformed reads empty.
pub fn json_list_decode(token: Option<&str>) -> Vec<String> {
    token
        .and_then(|t| serde_json::from_str(t).ok())
        .unwrap_or_default()
}

/// Encode a JSON string-array filter; empty lists read as "no filter".
pub fn json_list_encode(values: &[String]) -> String {
    if values.is_empty() {
        return String::new();
    }
    serde_json::to_string(values).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipcman_state::Order;

    #[test]
    fn parse_and_encode_round_trip() {
        let q = QueryParams::parse("page=2&perPage=25&device=1.2.3");
        assert_eq!(q.get("page"), Some("2"));
        assert_eq!(q.get("device"), Some("1.2.3"));
        assert_eq!(q.encode(), "?page=2&perPage=25&device=1.2.3");
    }

    #[test]
    fn empty_encodes_without_question_mark() {
        assert_eq!(QueryParams::empty().encode(), "");
        assert_eq!(QueryParams::parse("").encode(), "");
    }

    #[test]
    fn set_replaces_and_empty_removes() {
        let mut q = QueryParams::parse("page=2");
        q.set("page", "3");
        assert_eq!(q.get("page"), Some("3"));
        q.set("page", "");
        assert_eq!(q.get("page"), None);
        assert!(q.is_empty());
    }

    #[test]
    fn absent_page_params_read_zero() {
        let q = QueryParams::empty();
        assert_eq!(q.page(), PagePagination::new(0, 0));
        assert_eq!(q.get_i32("page"), 0);

        let q = QueryParams::parse("page=oops");
        assert_eq!(q.page().page, 0);
    }

    #[test]
    fn page_params_round_trip_dropping_zeroes() {
        let mut q = QueryParams::empty();
        q.set_page(PagePagination::new(3, 25));
        assert_eq!(q.encode(), "?page=3&perPage=25");

        q.set_page(PagePagination::new(0, 0));
        assert_eq!(q.encode(), "");
    }

    #[test]
    fn sort_params_round_trip() {
        let mut q = QueryParams::empty();
        q.set_sort(&SortState::new("name", Order::Asc));
        assert_eq!(q.encode(), "?sort=name&order=asc");
        assert_eq!(q.sort(), SortState::new("name", Order::Asc));

        q.set_sort(&SortState::default());
        assert_eq!(q.encode(), "");
        assert_eq!(q.sort(), SortState::default());
    }

    #[test]
    fn dot_codec_round_trips_and_skips_garbage() {
        assert_eq!(dot_encode(&[1, 2, 3]), "1.2.3");
        assert_eq!(dot_decode(Some("1.2.3")), vec![1, 2, 3]);
        assert_eq!(dot_decode(Some("1.x.3")), vec![1, 3]);
        assert_eq!(dot_decode(None), Vec::<i64>::new());
        assert_eq!(dot_encode(&[]), "");
    }

    #[test]
    fn json_list_codec() {
        let encoded = json_list_encode(&["VideoMotion".to_string(), "AlarmLocal".to_string()]);
        assert_eq!(encoded, r#"["VideoMotion","AlarmLocal"]"#);
        assert_eq!(
            json_list_decode(Some(&encoded)),
            vec!["VideoMotion".to_string(), "AlarmLocal".to_string()]
        );
        assert_eq!(json_list_decode(Some("not json")), Vec::<String>::new());
        assert_eq!(json_list_encode(&[]), "");
    }
}
