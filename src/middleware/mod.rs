//! Ready-made filters.
//!
//! Filters share the handler signature and run before every matched handler. Writing
//! any body byte from a filter ends the request there.

mod access_log;
mod auth;

pub use access_log::access_log;
pub use auth::require_bearer;
