use thiserror::Error;

/// Errors surfaced by the response builder.
///
/// All failures are synchronous and non-retryable; nothing is logged or
/// recovered internally. Validation happens before any mutation, so a
/// returned error means the response is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Status code outside the valid `[100, 600)` range.
    #[error("the HTTP status code \"{0}\" is not valid")]
    InvalidStatusCode(u16),

    /// Header lookup miss in [`Response::header`](crate::Response::header) or
    /// [`Response::header_line`](crate::Response::header_line).
    #[error("undefined header name: {0}")]
    HeaderNotFound(String),

    /// An empty sequence was passed as a header value. A stored header always
    /// carries at least one value.
    #[error("header \"{0}\" was given an empty value sequence")]
    EmptyHeaderValues(String),
}
