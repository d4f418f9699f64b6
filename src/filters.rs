//! Query filters for list operations.
//!
//! Every list filter implements [`QueryFilter`], turning its set fields into
//! the raw query string of the list request. Unset fields are never emitted,
//! and a page cursor returned by a previous list call always comes first.

use std::fmt::Display;

/// A value that renders list/search criteria as a URL query string.
///
/// Passed to list operations as `Option<&dyn QueryFilter>`; `None` sends no
/// query string and leaves the API defaults in place.
///
/// # Example
///
/// ```rust
/// use freshservice::filters::QueryFilter;
/// use freshservice::resources::RequesterListFilter;
///
/// let filter = RequesterListFilter {
///     page_query: Some("page=2".to_string()),
///     active: Some(true),
///     ..Default::default()
/// };
/// assert_eq!(filter.query_string(), "page=2&active=true");
/// ```
pub trait QueryFilter: Send + Sync {
    /// Returns the query string, without a leading `?`.
    fn query_string(&self) -> String;
}

/// Ordered collection of query clauses joined with `&`.
#[derive(Debug, Default)]
pub(crate) struct QueryClauses(Vec<String>);

impl QueryClauses {
    /// Starts a clause list with the page cursor, verbatim, when one is set.
    pub(crate) fn with_cursor(page_query: Option<&str>) -> Self {
        let mut clauses = Self::default();
        if let Some(cursor) = page_query.filter(|c| !c.is_empty()) {
            clauses.0.push(cursor.to_string());
        }
        clauses
    }

    /// Appends `key=value`, percent-encoding the value.
    pub(crate) fn push(&mut self, key: &str, value: impl Display) {
        self.0
            .push(format!("{key}={}", urlencoding::encode(&value.to_string())));
    }

    /// Appends a pre-formatted clause verbatim.
    pub(crate) fn push_raw(&mut self, clause: impl Into<String>) {
        self.0.push(clause.into());
    }

    pub(crate) fn finish(self) -> String {
        self.0.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_comes_first() {
        let mut clauses = QueryClauses::with_cursor(Some("page=4&per_page=10"));
        clauses.push("email", "jane@example.com");
        assert_eq!(
            clauses.finish(),
            "page=4&per_page=10&email=jane%40example.com"
        );
    }

    #[test]
    fn test_empty_cursor_is_ignored() {
        let mut clauses = QueryClauses::with_cursor(Some(""));
        clauses.push("active", true);
        assert_eq!(clauses.finish(), "active=true");
    }

    #[test]
    fn test_no_clauses_yields_empty_string() {
        assert_eq!(QueryClauses::with_cursor(None).finish(), "");
    }

    #[test]
    fn test_raw_clause_is_not_encoded() {
        let mut clauses = QueryClauses::default();
        clauses.push_raw("include=stats,requester");
        assert_eq!(clauses.finish(), "include=stats,requester");
    }
}
