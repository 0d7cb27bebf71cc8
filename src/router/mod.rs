//! # Router Module
//!
//! Pattern compilation and the ordered route table.
//!
//! ## Overview
//!
//! Route patterns such as `/cats/:id([0-9]+)` are compiled at registration time into
//! a left-anchored regex plus a positional table of parameter names. Matching walks
//! the table in registration order and returns the first route whose method matches
//! and whose regex covers the whole request path.
//!
//! ## Example
//!
//! ```rust
//! use gooday::router::Router;
//! use gooday::server::{Request, ResponseSink};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/cats/:id([0-9]+)", |req: &mut Request, res: &mut dyn ResponseSink| {
//!     let id = req.query_param("id").unwrap_or_default();
//!     let _ = res.write_all(format!("cat {id}\n").as_bytes());
//! });
//!
//! let matched = router.match_route(&Method::GET, "/cats/42").unwrap();
//! assert_eq!(matched.get_path_param("id"), Some("42"));
//! assert!(router.match_route(&Method::GET, "/cats/abc").is_none());
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan, O(n) in the number of routes.

mod core;
pub mod pattern;

pub use core::{Handler, ParamVec, Route, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use pattern::{compile_pattern, CompiledPattern, PatternError};
