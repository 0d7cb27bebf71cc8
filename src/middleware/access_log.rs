use crate::server::{Request, ResponseSink};
use tracing::debug;

/// Filter that logs each matched request at debug level and never writes.
pub fn access_log() -> impl Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static {
    |req: &mut Request, _res: &mut dyn ResponseSink| {
        debug!(
            method = %req.method,
            path = %req.path,
            query = %req.raw_query,
            user_agent = req.header("user-agent").unwrap_or("-"),
            "Request received"
        );
    }
}
