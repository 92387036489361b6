use crate::http::method::Method;
use crate::http::middleware::{Middleware, Next};
use crate::http::request::{Request, RequestContext};
use crate::http::{self, Response};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// A routing rule's body. Returning `None` means the rule declines the
/// request and dispatch moves on to the next matching rule.
pub type HandlerFunc = Box<dyn Fn(&RequestContext) -> Option<Response> + Send + Sync>;

pub struct Handler {
    method: Method,
    regex: Regex,
    f: HandlerFunc,
}

static PATTERN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(?P<var>[a-z][a-z0-9]*)>").unwrap());

/// An ordered rule list. Registration order is the decision order, so
/// earlier rules shadow later ones for the targets they accept.
#[derive(Default)]
pub struct Router {
    handlers: Vec<Handler>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl Router {
    pub fn new() -> Router {
        Router::default()
    }

    /// Registers a rule. `pattern` is anchored and may contain `<var>`
    /// segments, each matching one non-empty path segment and captured into
    /// the request context's URL vars.
    pub fn add_handler(&mut self, m: Method, pattern: &str, f: HandlerFunc) {
        let pattern = PATTERN_RE
            .replace_all(pattern, |capt: &Captures| {
                format!(r"(?<{}>[^/?]+)", capt.name("var").unwrap().as_str())
            })
            .to_string();
        let pattern = format!("^{}$", pattern);

        let compiled = Regex::new(&pattern).unwrap();

        self.handlers.push(Handler {
            method: m,
            regex: compiled,
            f,
        })
    }

    pub fn add_middleware(&mut self, m: Box<dyn Middleware>) {
        self.middlewares.push(m);
    }

    /// Runs the middleware chain around rule dispatch.
    pub fn dispatch(&self, req: &Request) -> Response {
        let endpoint = |req: &Request| self.route(req);
        Next {
            middlewares: &self.middlewares,
            endpoint: &endpoint,
        }
        .run(req)
    }

    fn route(&self, req: &Request) -> Response {
        for handler in &self.handlers {
            if handler.method != req.method {
                continue;
            }
            let Some(capt) = handler.regex.captures(&req.url) else {
                continue;
            };

            let ctx = RequestContext::from(req, url_vars(&handler.regex, &capt));
            if let Some(response) = (handler.f)(&ctx) {
                return response;
            }
        }

        http::not_found()
    }
}

fn url_vars(regex: &Regex, capt: &Captures) -> HashMap<String, String> {
    regex
        .capture_names()
        .flatten()
        .filter_map(|name| {
            capt.name(name)
                .map(|m| (name.to_string(), m.as_str().to_string()))
        })
        .collect()
}
