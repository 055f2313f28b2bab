//! City name query

use std::fmt;

use tracing::debug;

use crate::client::PlanError;

/// Message shown when the user submits nothing but whitespace
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name";

/// A trimmed, non-empty city name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim the raw input and reject it if nothing is left
    ///
    /// No length limit or character filtering is applied.
    pub fn parse(raw: &str) -> Result<Self, PlanError> {
        debug!(raw_len = raw.len(), "Query::parse: called");
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            debug!("Query::parse: empty after trim");
            return Err(PlanError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let query = Query::parse("  Paris \n").unwrap();
        assert_eq!(query.as_str(), "Paris");
    }

    #[test]
    fn test_parse_keeps_inner_whitespace() {
        let query = Query::parse(" New York ").unwrap();
        assert_eq!(query.as_str(), "New York");
    }

    #[test]
    fn test_parse_rejects_spaces_only() {
        let err = Query::parse("  ").unwrap_err();
        assert!(matches!(err, PlanError::EmptyInput));
        assert_eq!(err.to_string(), EMPTY_INPUT_MESSAGE);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Query::parse("").is_err());
    }

    proptest! {
        #[test]
        fn test_whitespace_only_is_always_rejected(raw in "[ \t\r\n]{0,32}") {
            prop_assert!(matches!(Query::parse(&raw), Err(PlanError::EmptyInput)));
        }

        #[test]
        fn test_parsed_query_is_never_padded(raw in "[ \t]{0,4}[a-zA-Z][a-zA-Z ]{0,20}[ \t]{0,4}") {
            let query = Query::parse(&raw).unwrap();
            prop_assert_eq!(query.as_str(), query.as_str().trim());
            prop_assert!(!query.as_str().is_empty());
        }
    }
}
