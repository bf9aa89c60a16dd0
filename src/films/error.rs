use thiserror::Error;

/// Message shown for any non-success HTTP status.
pub const REQUEST_FAILED_MESSAGE: &str = "Something went wrong!";

/// A single film record that does not satisfy the view model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid release date {0:?}, expected YYYY-MM-DD")]
    InvalidReleaseDate(String),
}

/// Everything that can go wrong between pressing "fetch" and having a movie list.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Status outside 2xx. Neither the code nor the body is inspected.
    #[error("{}", REQUEST_FAILED_MESSAGE)]
    RequestFailed,

    /// Body was not the expected JSON. Carries the parser's own message.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("Malformed film record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: SchemaError,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// The string stored in the controller's `error` field.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_timeout())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::MalformedResponse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message_is_fixed() {
        assert_eq!(FetchError::RequestFailed.user_message(), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn test_malformed_response_surfaces_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let expected = parse_err.to_string();
        let err: FetchError = parse_err.into();
        assert_eq!(err.user_message(), expected);
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_invalid_record_names_index_and_field() {
        let err = FetchError::InvalidRecord {
            index: 2,
            source: SchemaError::MissingField("title"),
        };
        assert_eq!(
            err.user_message(),
            "Malformed film record #2: missing field `title`"
        );
    }
}
