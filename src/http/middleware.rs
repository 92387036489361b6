use crate::http::Response;
use crate::http::request::Request;
use std::time::Instant;
use tracing::info;

/// Wraps dispatch of a request. Middlewares run in registration order, each
/// deciding whether and when to call the rest of the chain.
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &Request, next: Next) -> Response;
}

/// The remainder of the middleware chain, ending at the router's rule scan.
pub struct Next<'a> {
    pub(crate) middlewares: &'a [Box<dyn Middleware>],
    pub(crate) endpoint: &'a dyn Fn(&Request) -> Response,
}

impl Next<'_> {
    pub fn run(self, req: &Request) -> Response {
        if let Some((first, rest)) = self.middlewares.split_first() {
            first.handle(
                req,
                Next {
                    middlewares: rest,
                    endpoint: self.endpoint,
                },
            )
        } else {
            (self.endpoint)(req)
        }
    }
}

/// Logs one line per dispatched request.
pub struct AccessLog;

impl Middleware for AccessLog {
    fn handle(&self, req: &Request, next: Next) -> Response {
        let started = Instant::now();
        let response = next.run(req);
        info!(
            method = %req.method,
            path = %req.url,
            status = response.status.code_num,
            elapsed_us = started.elapsed().as_micros() as u64,
            "request"
        );
        response
    }
}
