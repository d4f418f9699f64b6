//! HTTP response types for the Freshservice API SDK.
//!
//! This module provides the [`HttpResponse`] type, the `Link` header
//! pagination helper [`has_next_page`] and the [`RateLimit`] header view.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;

/// Rate limit information parsed from the `X-RateLimit-*` headers.
///
/// Informational only; the client never throttles or retries on its own.
///
/// # Example
///
/// ```rust
/// use freshservice::clients::{HttpResponse, RateLimit};
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-total".to_string(), vec!["5000".to_string()]);
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["4990".to_string()]);
///
/// let response = HttpResponse::new(200, headers, String::new());
/// let limit = response.rate_limit().unwrap();
/// assert_eq!(limit.total, 5000);
/// assert_eq!(limit.remaining, 4990);
/// assert!(limit.used_current_request.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per minute for the account.
    pub total: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Credits consumed by the request that produced this response.
    pub used_current_request: Option<u32>,
}

/// Extracts the query string of the `rel="next"` link from a `Link` header value.
///
/// The header format is `<url>; rel="next", <url>; rel="prev"`. Links are
/// delimited by their angle brackets, so commas inside a URL (e.g.
/// `include=stats,requester`) are preserved. The query is returned verbatim.
///
/// # Example
///
/// ```rust
/// use freshservice::clients::parse_next_link;
///
/// let next = parse_next_link(r#"</api/v2/requesters?page=2>; rel="next""#);
/// assert_eq!(next.as_deref(), Some("page=2"));
/// assert!(parse_next_link(r#"</api/v2/requesters?page=1>; rel="prev""#).is_none());
/// ```
#[must_use]
pub fn parse_next_link(header_value: &str) -> Option<String> {
    let mut rest = header_value;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let close = after_open.find('>')?;
        let url = &after_open[..close];
        let params_and_rest = &after_open[close + 1..];

        // Parameters run until the next link starts
        let params_end = params_and_rest.find('<').unwrap_or(params_and_rest.len());
        let params = &params_and_rest[..params_end];

        let is_next = params.split(';').any(|param| {
            let param = param.trim().trim_end_matches(',').trim();
            param
                .strip_prefix("rel=")
                .is_some_and(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
        });

        if is_next {
            return url
                .split_once('?')
                .map(|(_, query)| query.to_string())
                .filter(|query| !query.is_empty());
        }

        rest = &params_and_rest[params_end..];
    }

    None
}

/// Returns the next-page cursor for a list response, if there is one.
///
/// The cursor is the query string of the `rel="next"` link, to be passed back
/// as the `page_query` of the next list call. `None` means this was the last
/// page.
#[must_use]
pub fn has_next_page(response: &HttpResponse) -> Option<String> {
    response
        .headers
        .get("link")?
        .iter()
        .find_map(|value| parse_next_link(value))
}

/// An HTTP response from the Freshservice API.
///
/// Header names are stored lowercase; a header may have multiple values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header (case-insensitive name).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the next-page cursor, see [`has_next_page`].
    #[must_use]
    pub fn next_page(&self) -> Option<String> {
        has_next_page(self)
    }

    /// Returns the rate limit headers, when the API sent them.
    #[must_use]
    pub fn rate_limit(&self) -> Option<RateLimit> {
        let parse = |name: &str| self.header(name).and_then(|v| v.trim().parse::<u32>().ok());

        Some(RateLimit {
            total: parse("x-ratelimit-total")?,
            remaining: parse("x-ratelimit-remaining")?,
            used_current_request: parse("x-ratelimit-used-currentrequest"),
        })
    }

    /// Decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] carrying this response's status code if
    /// the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|source| HttpError::Decode {
            code: self.code,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn with_link(link: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("link".to_string(), vec![link.to_string()]);
        HttpResponse::new(200, headers, String::new())
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 429, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), String::new()).is_ok());
        }
    }

    #[test]
    fn test_next_link_relative_url() {
        let response = with_link(r#"</api/v2/requesters?page=2>; rel="next""#);
        assert_eq!(has_next_page(&response).as_deref(), Some("page=2"));
    }

    #[test]
    fn test_next_link_absolute_url_keeps_full_query() {
        let response = with_link(
            r#"<https://acme.freshservice.com/api/v2/tickets?include=stats,requester&page=3&per_page=30>; rel="next""#,
        );
        assert_eq!(
            response.next_page().as_deref(),
            Some("include=stats,requester&page=3&per_page=30")
        );
    }

    #[test]
    fn test_next_link_among_several_links() {
        let link = r#"</api/v2/tickets?page=1>; rel="prev", </api/v2/tickets?page=3>; rel="next""#;
        assert_eq!(parse_next_link(link).as_deref(), Some("page=3"));

        let link = r#"</api/v2/tickets?page=3>; rel="next", </api/v2/tickets?page=1>; rel="prev""#;
        assert_eq!(parse_next_link(link).as_deref(), Some("page=3"));
    }

    #[test]
    fn test_next_link_bare_rel_value() {
        assert_eq!(
            parse_next_link("</api/v2/agents?page=5>; rel=next").as_deref(),
            Some("page=5")
        );
    }

    #[test]
    fn test_no_next_link() {
        assert!(has_next_page(&HttpResponse::new(200, HashMap::new(), String::new())).is_none());
        assert!(parse_next_link(r#"</api/v2/tickets?page=1>; rel="prev""#).is_none());
        assert!(parse_next_link(r#"</api/v2/tickets>; rel="next""#).is_none());
        assert!(parse_next_link("garbage").is_none());
    }

    #[test]
    fn test_rate_limit_parsing() {
        let mut headers = HashMap::new();
        headers.insert("x-ratelimit-total".to_string(), vec!["140".to_string()]);
        headers.insert("x-ratelimit-remaining".to_string(), vec!["139".to_string()]);
        headers.insert(
            "x-ratelimit-used-currentrequest".to_string(),
            vec!["1".to_string()],
        );

        let response = HttpResponse::new(200, headers, String::new());
        assert_eq!(
            response.rate_limit(),
            Some(RateLimit {
                total: 140,
                remaining: 139,
                used_current_request: Some(1),
            })
        );
    }

    #[test]
    fn test_rate_limit_absent() {
        assert!(HttpResponse::new(200, HashMap::new(), String::new())
            .rate_limit()
            .is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = with_link("<x?y=1>; rel=\"next\"");
        assert!(response.header("Link").is_some());
    }

    #[test]
    fn test_json_decode_error_carries_status() {
        let response = HttpResponse::new(201, HashMap::new(), "not json".to_string());
        let result: Result<Value, HttpError> = response.json();
        assert!(matches!(result, Err(HttpError::Decode { code: 201, .. })));
    }
}
