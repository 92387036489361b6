use crate::http::method::Method;
use crate::http::request::Request;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// Not a failure: the buffer does not yet hold a complete request.
    #[error("request is not complete yet")]
    Incomplete,
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("unsupported method: {0:?}")]
    UnsupportedMethod(String),
    #[error("header block is not valid UTF-8")]
    HeaderEncoding,
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
}

/// Tries to frame one request out of the bytes buffered so far.
///
/// On success returns the parsed request together with the number of bytes
/// it consumed, so the caller can drop exactly that prefix and keep any
/// pipelined remainder. `Err(Incomplete)` means "read more and retry": it is
/// returned until the `\r\n\r\n` header terminator has arrived and the
/// buffer holds at least Content-Length body bytes after it.
///
/// Pure function of the buffer; never does I/O.
pub fn parse_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;

    let head = std::str::from_utf8(&buf[..headers_end]).map_err(|_| ParseError::HeaderEncoding)?;
    let mut lines = head.split("\r\n");

    let request_line = lines.next().unwrap_or_default();
    let (method, url, version) = parse_request_line(request_line)?;

    let mut headers: HashMap<String, String> = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        // Lines without a colon are skipped rather than rejected.
        let Some((k, v)) = line.split_once(':') else {
            continue;
        };
        headers.insert(k.trim().to_lowercase(), v.trim().to_string());
    }

    let content_length = match headers.get("content-length") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength(raw.clone()))?,
        None => 0,
    };

    let body_start = headers_end + 4;
    if buf.len() < body_start + content_length {
        return Err(ParseError::Incomplete);
    }

    // The body is taken verbatim, never decoded.
    let content = buf[body_start..body_start + content_length].to_vec();

    let request = Request {
        method,
        url,
        version,
        headers,
        content,
    };
    Ok((request, body_start + content_length))
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());
    let (Some(method_raw), Some(target), Some(version)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::MalformedRequestLine(line.to_string()));
    };

    if !target.starts_with('/') {
        return Err(ParseError::MalformedRequestLine(line.to_string()));
    }

    let method = Method::from_str(method_raw)
        .map_err(|_| ParseError::UnsupportedMethod(method_raw.to_string()))?;

    Ok((method, target.to_string(), version.to_string()))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
