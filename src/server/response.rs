use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use http::StatusCode;
use once_cell::sync::Lazy;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Outbound response channel used by filters and handlers.
///
/// Mirrors the usual status/header/body contract: headers and status may be set until
/// the first body write; later calls are implementation-defined (the buffered sink keeps
/// accepting them, a streaming transport would ignore them).
pub trait ResponseSink {
    fn write_status(&mut self, status: u16);
    /// Append a header line, keeping earlier values with the same name.
    fn add_header(&mut self, name: &str, value: &str);
    /// Replace every earlier value of `name` with `value`.
    fn set_header(&mut self, name: &str, value: &str);
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Write the whole buffer.
    fn write_all(&mut self, mut buf: &[u8]) -> io::Result<()> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(io::Error::new(io::ErrorKind::WriteZero, "failed to write body")),
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }
}

/// In-memory sink. The transport adapter dispatches into one of these and flushes it
/// to the wire afterwards; tests inspect it directly.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferedResponse {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, `200` if only a body was written.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    /// First header value with this (case-insensitive) name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Copy status, headers and body into a `may_minihttp` response.
    pub fn flush_into(self, res: &mut may_minihttp::Response) {
        let status = self.status();
        res.status_code(status as usize, status_reason(status));
        for (name, value) in &self.headers {
            match HEADER_LINES.intern(name, value) {
                Some(line) => {
                    res.header(line);
                }
                None => warn!(
                    header = %name,
                    capacity = HEADER_LINES.capacity,
                    "Header line cache full, header dropped"
                ),
            }
        }
        res.body_vec(self.body);
    }
}

impl ResponseSink for BufferedResponse {
    fn write_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.add_header(name, value);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Reason phrase for a status code.
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("OK")
}

/// Upper bound on distinct header lines kept alive for the transport.
pub const MAX_INTERNED_HEADER_LINES: usize = 4096;

// may_minihttp only takes `&'static str` header lines; distinct lines are leaked once
// and reused, up to a fixed number of lines.
static HEADER_LINES: Lazy<HeaderLines> =
    Lazy::new(|| HeaderLines::new(MAX_INTERNED_HEADER_LINES));

struct HeaderLines {
    lines: DashMap<String, &'static str>,
    leaked: AtomicUsize,
    capacity: usize,
}

impl HeaderLines {
    fn new(capacity: usize) -> Self {
        Self {
            lines: DashMap::new(),
            leaked: AtomicUsize::new(0),
            capacity,
        }
    }

    /// `None` once `capacity` distinct lines have been leaked.
    fn intern(&self, name: &str, value: &str) -> Option<&'static str> {
        let line = format!("{name}: {value}");
        if let Some(interned) = self.lines.get(&line) {
            return Some(*interned);
        }
        match self.lines.entry(line) {
            Entry::Occupied(e) => Some(*e.get()),
            Entry::Vacant(e) => {
                if self.leaked.fetch_add(1, Ordering::AcqRel) >= self.capacity {
                    self.leaked.fetch_sub(1, Ordering::AcqRel);
                    return None;
                }
                let leaked: &'static str = Box::leak(e.key().clone().into_boxed_str());
                Some(*e.insert(leaked))
            }
        }
    }

    fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Body written by [`not_found`].
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Standard not-found reply: plain text, status 404.
pub fn not_found(sink: &mut dyn ResponseSink) -> io::Result<()> {
    sink.set_header("Content-Type", "text/plain; charset=utf-8");
    sink.set_header("X-Content-Type-Options", "nosniff");
    sink.write_status(404);
    sink.write_all(NOT_FOUND_BODY.as_bytes())
}

/// Plain-text reply with the given status.
pub fn write_text(sink: &mut dyn ResponseSink, status: u16, body: &str) -> io::Result<()> {
    sink.set_header("Content-Type", "text/plain; charset=utf-8");
    sink.write_status(status);
    sink.write_all(body.as_bytes())
}
