//! Serialization of a [`Response`] to an abstract output sink.
//!
//! A [`ResponseSink`] receives, in order: one protocol-level status-code
//! announcement, a `Status:` line plus one text line per header, and the raw
//! body payload, followed by a single flush. [`Response::send`] drives that
//! sequence; it borrows the response immutably, so nothing can mutate the
//! response while emission is in progress.
//!
//! [`BufferedSink`] is the stock implementation over any [`io::Write`]: it
//! accumulates the whole emission and writes to the inner writer only on
//! flush, making the output atomic from the caller's perspective.

use std::io;

use crate::response::Response;

/// Abstract destination for a serialized response.
pub trait ResponseSink {
    /// Announces the numeric status code, ahead of any text output.
    fn status_code(&mut self, code: u16) -> io::Result<()>;

    /// Receives one text line: the `Status:` line, then each header line.
    fn line(&mut self, line: &str) -> io::Result<()>;

    /// Receives the body payload verbatim.
    fn payload(&mut self, body: &str) -> io::Result<()>;

    /// Completes the emission. Nothing is sent after this.
    fn flush(&mut self) -> io::Result<()>;
}

impl Response {
    /// Emits the response to `sink`: status announcement, status line,
    /// header lines in collection order (values joined with `"; "`), body,
    /// then one flush.
    pub fn send<S: ResponseSink>(&self, sink: &mut S) -> io::Result<()> {
        sink.status_code(self.status_code())?;
        sink.line(&format!(
            "Status: {} {}",
            self.status_code(),
            self.reason_phrase()
        ))?;
        for (name, values) in self.headers_iter() {
            sink.line(&format!("{}: {}", name, values.join("; ")))?;
        }
        if let Some(body) = self.body() {
            sink.payload(body)?;
        }
        sink.flush()
    }
}

/// Buffers the whole emission and hands it to the inner writer on flush.
///
/// Lines are terminated with `\r\n`; the body follows the last line without
/// a separator, mirroring CGI-style output where headers and body travel
/// through distinct channels.
pub struct BufferedSink<W: io::Write> {
    inner: W,
    buffer: String,
    status: Option<u16>,
}

impl<W: io::Write> BufferedSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: String::new(),
            status: None,
        }
    }

    /// The last announced status code, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Consumes the sink, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> ResponseSink for BufferedSink<W> {
    fn status_code(&mut self, code: u16) -> io::Result<()> {
        self.status = Some(code);
        Ok(())
    }

    fn line(&mut self, line: &str) -> io::Result<()> {
        self.buffer.push_str(line);
        self.buffer.push_str("\r\n");
        Ok(())
    }

    fn payload(&mut self, body: &str) -> io::Result<()> {
        self.buffer.push_str(body);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.write_all(self.buffer.as_bytes())?;
        self.buffer.clear();
        self.inner.flush()
    }
}
