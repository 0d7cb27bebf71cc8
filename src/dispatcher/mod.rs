//! # Dispatcher Module
//!
//! Serves one request against a frozen [`Router`](crate::router::Router).
//!
//! ## Request Flow
//!
//! 1. Scan routes in registration order; skip on method mismatch or when the pattern
//!    does not cover the entire path
//! 2. Merge path parameters into the request's query string
//! 3. Run every filter with a [`ResponseTracker`](crate::server::ResponseTracker);
//!    the first filter that writes a body byte ends the request
//! 4. Run the matched handler
//! 5. If nothing was written, send `404 page not found`
//!
//! A path that matches under another method is treated exactly like an unknown path.

mod core;

pub use core::Outcome;
