//! Outgoing HTTP response as a mutable value object.
//!
//! The crate centers on [`Response`]: a status line, a case-insensitive,
//! order-preserving, multi-valued header collection, and an optional body.
//! A response is built through chainable mutating setters and then emitted
//! to a [`ResponseSink`] with [`Response::send`].
//!
//! ```
//! use http_reply::{BufferedSink, Response};
//!
//! let mut response = Response::new();
//! response
//!     .set_status(404, None)?
//!     .set_header("Content-Type", "text/html", false)?
//!     .set_body("<h1>404 Not Found</h1>");
//!
//! let mut sink = BufferedSink::new(Vec::new());
//! response.send(&mut sink)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Each response is owned by a single request-handling flow; there is no
//! internal locking. Cloning yields a fully independent instance.

mod error;
mod headers;
mod response;
mod sink;
pub mod status;

pub use error::Error;
pub use headers::{Headers, ToHeaderValues};
pub use response::{Body, Response};
pub use sink::{BufferedSink, ResponseSink};
