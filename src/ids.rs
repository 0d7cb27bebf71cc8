//! Per-dispatch correlation ids.

use crate::server::Request;
use std::fmt;
use ulid::Ulid;

/// Header a caller can use to supply its own id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ULID recorded on the `dispatch` span so every log line of one request can be
/// grouped, including lines written by filters and handlers.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Id carried by `req`, or a fresh one when the header is absent or is not a ULID.
    #[must_use]
    pub fn for_request(req: &Request) -> Self {
        req.header(REQUEST_ID_HEADER)
            .map(str::trim)
            .and_then(|value| Ulid::from_string(value).ok())
            .map_or_else(Self::generate, Self)
    }

    #[must_use]
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
