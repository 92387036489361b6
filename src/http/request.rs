use crate::http::method::Method;
use std::collections::HashMap;

/// A fully framed request.
///
/// Header names are stored lower-cased with trimmed values; when a header
/// occurs more than once the last occurrence wins. `content` holds the raw
/// body bytes, empty when the request declared no Content-Length.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub version: String,
    pub headers: HashMap<String, String>,
    pub content: Vec<u8>,
}

impl Request {
    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers.get(&k.to_lowercase()).map(|v| v.as_str())
    }

    /// Whether the client asked for the connection to be closed after this
    /// exchange. The value is compared case-insensitively.
    pub fn wants_close(&self) -> bool {
        self.get_header("connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }
}

/// A request paired with the variables captured by the route pattern that
/// matched it.
#[derive(Debug)]
pub struct RequestContext<'a> {
    request: &'a Request,
    url_vars: HashMap<String, String>,
}

impl RequestContext<'_> {
    pub fn from(request: &Request, url_vars: HashMap<String, String>) -> RequestContext<'_> {
        RequestContext { request, url_vars }
    }

    pub fn get_var(&self, k: &str) -> Option<&str> {
        self.url_vars.get(k).map(|v| v.as_str())
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.request.get_header(k)
    }

    pub fn request(&self) -> &Request {
        self.request
    }
}
