use super::request::parse_request;
use super::response::BufferedResponse;
use crate::router::Router;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;

/// `may_minihttp` service that hands every request to a shared, frozen [`Router`].
///
/// The router is read-only while serving, so clones share it without locking.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
}

impl AppService {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let mut request = parse_request(req);
        let mut buffered = BufferedResponse::new();
        self.router.dispatch(&mut request, &mut buffered);
        buffered.flush_into(res);
        Ok(())
    }
}
