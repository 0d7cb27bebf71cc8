use super::response::ResponseSink;
use std::io;

/// Decorator that records whether a response has started.
///
/// The first successful write of at least one byte flips `started`; it never flips
/// back. Setting a status or headers alone does not count as starting a response.
///
/// A zero-length write leaves `started` unset, deliberately stricter than counting any
/// write call: a filter that writes nothing does not end the dispatch.
pub struct ResponseTracker<'a> {
    inner: &'a mut dyn ResponseSink,
    started: bool,
    status: Option<u16>,
}

impl<'a> ResponseTracker<'a> {
    pub fn new(inner: &'a mut dyn ResponseSink) -> Self {
        Self {
            inner,
            started: false,
            status: None,
        }
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Status observed so far. Implicitly `200` once a body has been written without
    /// an explicit status, `None` if nothing happened yet.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self.status {
            Some(status) => Some(status),
            None if self.started => Some(200),
            None => None,
        }
    }
}

impl ResponseSink for ResponseTracker<'_> {
    fn write_status(&mut self, status: u16) {
        self.status = Some(status);
        self.inner.write_status(status);
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.inner.add_header(name, value);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.inner.set_header(name, value);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        if written > 0 {
            self.started = true;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::BufferedResponse;

    struct FailingSink;

    impl ResponseSink for FailingSink {
        fn write_status(&mut self, _status: u16) {}
        fn add_header(&mut self, _name: &str, _value: &str) {}
        fn set_header(&mut self, _name: &str, _value: &str) {}
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_fresh_tracker_has_not_started() {
        let mut res = BufferedResponse::new();
        let tracker = ResponseTracker::new(&mut res);
        assert!(!tracker.started());
        assert_eq!(tracker.status(), None);
    }

    #[test]
    fn test_headers_and_status_do_not_start() {
        let mut res = BufferedResponse::new();
        let mut tracker = ResponseTracker::new(&mut res);
        tracker.add_header("X-A", "1");
        tracker.write_status(401);
        assert!(!tracker.started());
        assert_eq!(tracker.status(), Some(401));
        assert_eq!(res.header("x-a"), Some("1"));
        assert_eq!(res.status(), 401);
    }

    #[test]
    fn test_set_header_passes_through() {
        let mut res = BufferedResponse::new();
        let mut tracker = ResponseTracker::new(&mut res);
        tracker.add_header("Content-Type", "application/json");
        tracker.set_header("Content-Type", "text/plain");
        assert!(!tracker.started());
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn test_first_write_starts_and_stays_started() {
        let mut res = BufferedResponse::new();
        let mut tracker = ResponseTracker::new(&mut res);
        tracker.write(b"").unwrap();
        assert!(!tracker.started());
        tracker.write_all(b"hello").unwrap();
        assert!(tracker.started());
        tracker.write(b"").unwrap();
        assert!(tracker.started());
        assert_eq!(tracker.status(), Some(200));
        assert_eq!(res.body(), b"hello");
    }

    #[test]
    fn test_failed_write_does_not_start() {
        let mut sink = FailingSink;
        let mut tracker = ResponseTracker::new(&mut sink);
        assert!(tracker.write(b"x").is_err());
        assert!(!tracker.started());
    }
}
