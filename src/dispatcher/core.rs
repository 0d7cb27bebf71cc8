use crate::ids::RequestId;
use crate::router::Router;
use crate::server::response::not_found;
use crate::server::{Request, ResponseSink, ResponseTracker};
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The matched route's handler ran and wrote a response.
    Handled { route: usize },
    /// A filter wrote a response; the handler never ran.
    Filtered { route: usize, filter: usize },
    /// A route matched but nothing was written, so not-found was sent.
    Empty { route: usize },
    /// No route matched; not-found was sent.
    NotFound,
}

impl Router {
    /// Serve one request.
    ///
    /// Finds the first route whose method and whole path match, merges its path
    /// parameters into the request's query string, runs every filter and then the
    /// handler. A filter that writes any body byte ends the dispatch. If nothing was
    /// written by the end, the standard not-found response is sent.
    pub fn dispatch(&self, req: &mut Request, sink: &mut dyn ResponseSink) -> Outcome {
        let request_id = RequestId::for_request(req);
        let span = info_span!(
            "dispatch",
            request_id = %request_id,
            method = %req.method,
            path = %req.path
        );
        let _entered = span.enter();
        let start = Instant::now();

        let mut res = ResponseTracker::new(sink);
        let mut outcome = Outcome::NotFound;

        if let Some(matched) = self.match_route(&req.method, &req.path) {
            let route = matched.index;
            if !matched.path_params.is_empty() {
                req.merge_query(
                    matched
                        .path_params
                        .iter()
                        .map(|(name, value)| (&**name, value.as_str())),
                );
                debug!(raw_query = %req.raw_query, "Path params merged into query");
            }

            for (i, filter) in self.filters.iter().enumerate() {
                filter(&mut *req, &mut res);
                if res.started() {
                    info!(
                        pattern = %matched.route.pattern,
                        filter = i,
                        status = res.status().unwrap_or(200),
                        latency_us = start.elapsed().as_micros() as u64,
                        "Request short-circuited by filter"
                    );
                    return Outcome::Filtered { route, filter: i };
                }
            }

            (matched.route.handler)(&mut *req, &mut res);
            outcome = if res.started() {
                Outcome::Handled { route }
            } else {
                Outcome::Empty { route }
            };
        }

        if !res.started() {
            if let Err(err) = not_found(&mut res) {
                warn!(error = %err, "Failed to write not-found response");
            }
        }

        info!(
            status = res.status().unwrap_or(404),
            outcome = ?outcome,
            latency_us = start.elapsed().as_micros() as u64,
            "Request dispatched"
        );
        outcome
    }
}
