//! Outgoing HTTP response modeled as a mutable value object.
//!
//! A [`Response`] aggregates a status line, a [`Headers`] collection and an
//! optional body. It starts out as `200 OK` with no headers and no body and
//! is mutated in place through chainable setters. The naming is deliberately
//! `set_*`/`add_*`/`remove_*` rather than `with_*`: these methods mutate the
//! receiver and return it for chaining, they do not produce copies. Use
//! [`Clone`] when an independent response is needed; the clone carries a deep
//! copy of the header collection.
//!
//! Serialization to an output sink lives in [`crate::sink`].

use indexmap::IndexMap;

use crate::error::Error;
use crate::headers::{Headers, ToHeaderValues};
use crate::status;

/// Response body text. Converts from strings, numeric scalars, and `()`
/// (the empty body); there is no conversion for anything else, so
/// unsupported body types fail to compile. An absent body is modeled on
/// [`Response`] itself, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body(String);

impl Body {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! body_from_scalar {
    ($($t:ty),+ $(,)?) => {$(
        impl From<$t> for Body {
            fn from(value: $t) -> Self {
                Body(value.to_string())
            }
        }
    )+};
}

body_from_scalar!(&str, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body(value)
    }
}

/// The "null" body input: coerces to an empty string body, as opposed to
/// [`Response::clear_body`] which removes the body entirely.
impl From<()> for Body {
    fn from(_: ()) -> Self {
        Body(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    reason_phrase: String,
    headers: Headers,
    body: Option<Body>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// A fresh `200 OK` response with no headers and no body.
    pub fn new() -> Self {
        Self {
            status_code: 200,
            reason_phrase: "OK".to_string(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Sets the status code and resolves the reason phrase.
    ///
    /// Codes outside `[100, 600)` fail with [`Error::InvalidStatusCode`].
    /// When `reason` is `None` or empty, the phrase comes from the status
    /// catalog, falling back to `"unknown status"` for codes the catalog
    /// does not know. An explicit phrase is stored verbatim.
    pub fn set_status(&mut self, code: u16, reason: Option<&str>) -> Result<&mut Self, Error> {
        if !status::is_valid_code(code) {
            return Err(Error::InvalidStatusCode(code));
        }
        self.status_code = code;
        self.reason_phrase = match reason {
            Some(phrase) if !phrase.is_empty() => phrase.to_string(),
            _ => status::reason_phrase(code)
                .unwrap_or(status::UNKNOWN_REASON)
                .to_string(),
        };
        Ok(self)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// True iff a case-insensitive match for `name` is stored.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    /// Values stored under `name`, failing with [`Error::HeaderNotFound`]
    /// when absent. Use [`has_header`](Self::has_header) first when absence
    /// is expected.
    pub fn header(&self, name: &str) -> Result<&[String], Error> {
        self.headers.get(name)
    }

    /// Values stored under `name` joined with `", "`.
    pub fn header_line(&self, name: &str) -> Result<String, Error> {
        self.headers.get_line(name)
    }

    /// Replaces the header's values. See [`Headers::set`] for the `rename`
    /// semantics.
    pub fn set_header(
        &mut self,
        name: &str,
        value: impl ToHeaderValues,
        rename: bool,
    ) -> Result<&mut Self, Error> {
        self.headers.set(name, value, rename)?;
        Ok(self)
    }

    /// Appends to the header's values. See [`Headers::add`] for the `rename`
    /// semantics.
    pub fn add_header(
        &mut self,
        name: &str,
        value: impl ToHeaderValues,
        rename: bool,
    ) -> Result<&mut Self, Error> {
        self.headers.add(name, value, rename)?;
        Ok(self)
    }

    /// Removes the case-insensitively matching header. No-op when absent.
    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    /// Full independent copy of the header collection, keyed by display
    /// name and in insertion order.
    pub fn headers(&self) -> IndexMap<String, Vec<String>> {
        self.headers.to_map()
    }

    /// `(display name, values)` pairs in insertion order.
    pub fn headers_iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers.iter()
    }

    /// Stores the body. Accepts anything convertible to [`Body`]: strings,
    /// numeric scalars, or `()` for an empty body.
    pub fn set_body(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Restores the no-body state, distinct from an empty string body.
    pub fn clear_body(&mut self) -> &mut Self {
        self.body = None;
        self
    }

    /// The stored body, `None` when never set (or cleared).
    pub fn body(&self) -> Option<&str> {
        self.body.as_ref().map(Body::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_response_defaults() {
        let response = Response::new();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.reason_phrase(), "OK");
        assert!(response.headers().is_empty());
        assert_eq!(response.body(), None);
    }

    #[test]
    fn status_range_is_enforced() {
        let mut response = Response::new();
        assert_eq!(
            response.set_status(99, None).unwrap_err(),
            Error::InvalidStatusCode(99)
        );
        assert_eq!(
            response.set_status(600, None).unwrap_err(),
            Error::InvalidStatusCode(600)
        );
        // The failed calls left the response untouched.
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.reason_phrase(), "OK");

        for code in 100..600 {
            assert!(response.set_status(code, None).is_ok());
        }
    }

    #[test]
    fn reason_phrase_resolution() {
        let mut response = Response::new();

        response.set_status(404, None).unwrap();
        assert_eq!(response.reason_phrase(), "Not Found");

        response.set_status(104, None).unwrap();
        assert_eq!(response.reason_phrase(), "unknown status");

        response.set_status(104, Some("new")).unwrap();
        assert_eq!(response.reason_phrase(), "new");

        // An empty phrase falls back to the catalog as well.
        response.set_status(203, Some("")).unwrap();
        assert_eq!(response.reason_phrase(), "Non-Authoritative Information");
    }

    #[test]
    fn chained_mutation() {
        let mut response = Response::new();
        response
            .set_status(201, None)
            .unwrap()
            .set_header("Content-Type", "application/json", false)
            .unwrap()
            .set_body("{}");

        assert_eq!(response.status_code(), 201);
        assert_eq!(response.header_line("content-type").unwrap(), "application/json");
        assert_eq!(response.body(), Some("{}"));
    }

    #[test]
    fn body_accepts_scalars() {
        let mut response = Response::new();

        response.set_body(42u32);
        assert_eq!(response.body(), Some("42"));

        response.set_body(String::from("hello"));
        assert_eq!(response.body(), Some("hello"));

        response.set_body("");
        assert_eq!(response.body(), Some(""));

        response.clear_body();
        assert_eq!(response.body(), None);
    }

    #[test]
    fn unit_body_coerces_to_empty_string() {
        let mut response = Response::new();
        response.set_body(());
        // Distinct from the never-set state.
        assert_eq!(response.body(), Some(""));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Response::new();
        original
            .set_header("Content-Type", "text/plain", false)
            .unwrap()
            .set_body("one");

        let mut copy = original.clone();
        copy.set_header("Content-Type", "application/json", false)
            .unwrap()
            .add_header("Vary", "Accept", false)
            .unwrap()
            .set_body("two");

        assert_eq!(original.header("content-type").unwrap(), ["text/plain"]);
        assert!(!original.has_header("Vary"));
        assert_eq!(original.body(), Some("one"));
        assert_eq!(copy.header("content-type").unwrap(), ["application/json"]);
    }
}
