pub mod encoding;
pub mod method;
pub mod middleware;
pub mod parse;
pub mod request;
pub mod router;
pub mod server;
pub mod status;

use self::status::Status;

pub(crate) const BUFFER_SIZE: usize = 1024;

/// A response ready for serialization.
///
/// Headers are kept in insertion order because that is the order they are
/// written on the wire. `content` is `None` for responses that carry neither
/// a body nor a Content-Length header (201, 404, the bare `/` response),
/// which is distinct from an empty body.
#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub headers: Vec<(String, String)>,
    pub content: Option<Vec<u8>>,
}

impl Response {
    pub fn from_parts(
        status: Status,
        headers: Vec<(String, String)>,
        content: Option<Vec<u8>>,
    ) -> Response {
        Response {
            status,
            headers,
            content,
        }
    }

    pub fn push_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn ok() -> Response {
    Response::from_parts(Status::OK, Vec::new(), None)
}

pub fn created() -> Response {
    Response::from_parts(Status::CREATED, Vec::new(), None)
}

pub fn bad_request() -> Response {
    Response::from_parts(Status::BAD_REQUEST, Vec::new(), None)
}

pub fn not_found() -> Response {
    Response::from_parts(Status::NOT_FOUND, Vec::new(), None)
}

pub fn method_not_allowed() -> Response {
    Response::from_parts(Status::METHOD_NOT_ALLOWED, Vec::new(), None)
}

pub fn internal_error() -> Response {
    Response::from_parts(Status::INTERNAL_SERVER_ERROR, Vec::new(), None)
}
