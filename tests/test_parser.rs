use depot::http::method::Method;
use depot::http::parse::{ParseError, parse_request};

#[test]
fn test_parse_simple_get_request() {
    let buf = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (request, consumed) = parse_request(buf).unwrap();

    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, "/");
    assert_eq!(request.version, "HTTP/1.1");
    assert_eq!(request.get_header("host"), Some("example.com"));
    assert!(request.content.is_empty());
    assert_eq!(consumed, buf.len());
}

#[test]
fn test_parse_post_request_with_binary_body() {
    let buf = b"POST /blob HTTP/1.1\r\nContent-Length: 5\r\n\r\n\x00\x01ab\xff";
    let (request, consumed) = parse_request(buf).unwrap();

    assert_eq!(request.method, Method::POST);
    assert_eq!(request.content, vec![0x00, 0x01, b'a', b'b', 0xff]);
    assert_eq!(consumed, buf.len());
}

#[test]
fn test_header_names_lowercased_and_values_trimmed() {
    let buf = b"GET / HTTP/1.1\r\nUser-Agent:   curl/8.0   \r\n\r\n";
    let (request, _) = parse_request(buf).unwrap();

    assert_eq!(request.headers.get("user-agent").unwrap(), "curl/8.0");
    assert_eq!(request.get_header("User-Agent"), Some("curl/8.0"));
}

#[test]
fn test_duplicate_header_last_occurrence_wins() {
    let buf = b"GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n";
    let (request, _) = parse_request(buf).unwrap();

    assert_eq!(request.get_header("x-tag"), Some("second"));
}

#[test]
fn test_header_line_without_colon_is_ignored() {
    let buf = b"GET / HTTP/1.1\r\njust some noise\r\nHost: here\r\n\r\n";
    let (request, _) = parse_request(buf).unwrap();

    assert_eq!(request.get_header("host"), Some("here"));
    assert_eq!(request.headers.len(), 1);
}

#[test]
fn test_incomplete_without_header_terminator() {
    let result = parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n");
    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_incomplete_with_partial_body() {
    let result = parse_request(b"POST /f HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello");
    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_empty_buffer_is_incomplete() {
    assert!(matches!(parse_request(b""), Err(ParseError::Incomplete)));
}

#[test]
fn test_request_line_with_too_few_tokens() {
    let result = parse_request(b"GET /\r\n\r\n");
    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[test]
fn test_request_line_extra_tokens_are_ignored() {
    let (request, _) = parse_request(b"GET / HTTP/1.1 junk\r\n\r\n").unwrap();
    assert_eq!(request.url, "/");
    assert_eq!(request.version, "HTTP/1.1");
}

#[test]
fn test_target_must_start_with_slash() {
    let result = parse_request(b"GET example.com HTTP/1.1\r\n\r\n");
    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[test]
fn test_unknown_method_is_rejected() {
    let result = parse_request(b"DELETE /f HTTP/1.1\r\n\r\n");
    assert!(matches!(result, Err(ParseError::UnsupportedMethod(_))));
}

#[test]
fn test_invalid_content_length_is_rejected() {
    let result = parse_request(b"POST /f HTTP/1.1\r\nContent-Length: banana\r\n\r\n");
    assert!(matches!(result, Err(ParseError::InvalidContentLength(_))));
}

#[test]
fn test_missing_content_length_means_empty_body() {
    let buf = b"POST /f HTTP/1.1\r\nHost: x\r\n\r\n";
    let (request, consumed) = parse_request(buf).unwrap();

    assert!(request.content.is_empty());
    assert_eq!(consumed, buf.len());
}

#[test]
fn test_pipelined_requests_frame_one_at_a_time() {
    let buf: Vec<u8> =
        b"POST /a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcGET /b HTTP/1.1\r\n\r\n".to_vec();

    let (first, consumed) = parse_request(&buf).unwrap();
    assert_eq!(first.url, "/a");
    assert_eq!(first.content, b"abc");

    let (second, rest) = parse_request(&buf[consumed..]).unwrap();
    assert_eq!(second.url, "/b");
    assert_eq!(consumed + rest, buf.len());
}

#[test]
fn test_wants_close_is_case_insensitive() {
    let (request, _) = parse_request(b"GET / HTTP/1.1\r\nConnection: Close\r\n\r\n").unwrap();
    assert!(request.wants_close());

    let (request, _) = parse_request(b"GET / HTTP/1.1\r\nConnection: keep-alive\r\n\r\n").unwrap();
    assert!(!request.wants_close());
}
