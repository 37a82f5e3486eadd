use serde_json::error::Category;
use thiserror::Error;

/// Errors surfaced by the API call methods on [`crate::DarkSky`].
///
/// Nothing is retried or recovered internally; every failure propagates to
/// the caller of the method that triggered it.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never completed: name resolution, connection, or a
    /// non-success HTTP status. Suppressed entirely when the client is
    /// built with `suppress_errors`.
    #[error("Network unavailable: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded as JSON.
    #[error("Unable to decode JSON response: {0}")]
    Decode(#[from] DecodeError),

    /// A precipitation timestamp fell outside the accepted window. Raised
    /// before any request is issued for the batch.
    #[error("Time {0} is out of range")]
    OutOfRangeTime(i64),
}

/// Classification of a failed JSON decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Bad JSON syntax at line {line}, column {column}")]
    BadSyntax { line: usize, column: usize },

    #[error("Unexpected control character found at line {line}, column {column}")]
    ControlCharacter { line: usize, column: usize },

    #[error("Unknown error, category {category:?}")]
    Unknown { category: Category },
}

impl DecodeError {
    /// Map a serde_json failure onto the decode taxonomy.
    ///
    /// serde_json folds control-character rejection into its syntax
    /// category; the message text is the only way to keep the two cases
    /// distinct. Premature end of input counts as bad syntax.
    pub(crate) fn classify(err: &serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        match err.classify() {
            Category::Syntax if err.to_string().contains("control character") => {
                DecodeError::ControlCharacter { line, column }
            }
            Category::Syntax | Category::Eof => DecodeError::BadSyntax { line, column },
            category => DecodeError::Unknown { category },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn classify_str(payload: &str) -> DecodeError {
        let err = serde_json::from_str::<Value>(payload).expect_err("payload must not parse");
        DecodeError::classify(&err)
    }

    #[test]
    fn truncated_payload_is_bad_syntax() {
        assert!(matches!(classify_str("{bad"), DecodeError::BadSyntax { .. }));
    }

    #[test]
    fn empty_payload_is_bad_syntax() {
        assert!(matches!(classify_str(""), DecodeError::BadSyntax { .. }));
    }

    #[test]
    fn raw_control_character_is_its_own_case() {
        // A literal newline inside a JSON string is rejected as a control
        // character, not generic bad syntax.
        assert!(matches!(
            classify_str("\"a\nb\""),
            DecodeError::ControlCharacter { .. }
        ));
    }

    #[test]
    fn non_syntax_failures_map_to_unknown() {
        let err = serde_json::from_str::<u32>("true").expect_err("bool is not a u32");
        assert_eq!(
            DecodeError::classify(&err),
            DecodeError::Unknown { category: Category::Data }
        );
    }

    #[test]
    fn decode_display_carries_the_classification() {
        let err = Error::Decode(DecodeError::BadSyntax { line: 1, column: 2 });
        let msg = err.to_string();
        assert!(msg.contains("Unable to decode JSON response"));
        assert!(msg.contains("Bad JSON syntax at line 1, column 2"));
    }

    #[test]
    fn out_of_range_display_reports_the_value() {
        let msg = Error::OutOfRangeTime(1350531963).to_string();
        assert!(msg.contains("1350531963"));
    }
}
