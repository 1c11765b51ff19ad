use thiserror::Error;

/// A filter value outside its fixed enumeration.
///
/// Carries the offending field and every rejected value so callers can report
/// all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} value(s): {}", .values.join(", "))]
pub struct ValidationError {
    pub field: &'static str,
    pub values: Vec<String>,
}

/// Errors returned by the search client and session.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A criteria tag was not a member of its enumeration.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network or TLS failure, or a non-2xx status, from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not well-formed XML.
    #[error("XML parse error in {context}: {source}")]
    Xml {
        context: String,
        #[source]
        source: quick_xml::Error,
    },

    /// The response is well-formed but does not have the expected shape.
    #[error("malformed search response ({context}): {reason}")]
    Decode { context: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },
}

impl SearchError {
    pub(crate) fn decode(context: impl Into<String>, reason: impl Into<String>) -> Self {
        SearchError::Decode {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
