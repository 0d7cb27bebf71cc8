use crate::server::{write_text, Request, ResponseSink};
use tracing::{debug, warn};

/// Filter that rejects requests whose `authorization` header is not `Bearer <token>`.
///
/// Rejections are answered with `401 Unauthorized` and a plain-text body, which stops
/// the filter chain before the handler runs.
pub fn require_bearer(
    token: impl Into<String>,
) -> impl Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static {
    let expected = format!("Bearer {}", token.into());
    move |req: &mut Request, res: &mut dyn ResponseSink| {
        match req.header("authorization") {
            Some(value) if value == expected => {
                debug!(path = %req.path, "Bearer token accepted");
            }
            provided => {
                debug!(
                    path = %req.path,
                    header_present = provided.is_some(),
                    "Bearer token rejected"
                );
                res.add_header("WWW-Authenticate", "Bearer");
                if let Err(err) = write_text(res, 401, "401 unauthorized\n") {
                    warn!(error = %err, "Failed to write unauthorized response");
                }
            }
        }
    }
}
