pub mod http_server;
pub mod request;
pub mod response;
pub mod service;
pub mod tracker;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, Request};
pub use response::{not_found, write_text, BufferedResponse, ResponseSink, NOT_FOUND_BODY};
pub use service::AppService;
pub use tracker::ResponseTracker;
