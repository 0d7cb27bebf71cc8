//! # gooday
//!
//! A minimal HTTP request router. Routes are registered against `:param` patterns,
//! compiled once into regexes, and matched in registration order. Every matched
//! request passes through a chain of filters before its handler runs; a filter that
//! writes a response ends the request there.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern compilation and the ordered route table
//! - **[`dispatcher`]** - Request dispatch: match, merge path params, filters, handler, not-found
//! - **[`server`]** - Request/response types, the response tracker, and the `may_minihttp` transport
//! - **[`middleware`]** - Ready-made filters (bearer auth, access logging)
//! - **[`handlers`]** - The weekday greeting demo handler
//! - **[`logging`]** / **[`runtime_config`]** - Ambient setup for the binary
//!
//! ## Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Router as Router::dispatch
//!     participant Filters as Filter Chain
//!     participant Handler
//!
//!     Client->>Server: GET /cats/42?color=red
//!     Server->>Router: Request, BufferedResponse
//!     Router->>Router: first route with same method<br/>whose regex covers the whole path
//!     alt No Route Match
//!         Router-->>Client: 404 page not found
//!     end
//!     Router->>Router: query = id=42&color=red
//!     loop each filter
//!         Router->>Filters: filter(req, tracker)
//!         alt filter wrote a body
//!             Filters-->>Client: filter's response
//!         end
//!     end
//!     Router->>Handler: handler(req, tracker)
//!     Handler-->>Client: 200 + body
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gooday::router::Router;
//! use gooday::server::{BufferedResponse, Request, ResponseSink};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/cats/:id([0-9]+)", |req: &mut Request, res: &mut dyn ResponseSink| {
//!     let id = req.query_param("id").unwrap_or_default();
//!     res.write_all(format!("cat {id}\n").as_bytes()).ok();
//! });
//!
//! let mut req = Request::new(Method::GET, "/cats/42");
//! let mut res = BufferedResponse::new();
//! router.dispatch(&mut req, &mut res);
//! assert_eq!(res.body_str(), "cat 42\n");
//!
//! let mut req = Request::new(Method::GET, "/cats/abc");
//! let mut res = BufferedResponse::new();
//! router.dispatch(&mut req, &mut res);
//! assert_eq!(res.status(), 404);
//! ```

pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::Outcome;
pub use router::{PatternError, Router};
pub use server::{BufferedResponse, Request, ResponseSink};
