use tiny::http::parser::{
    MAX_LINE, ParseError, drain_headers, parse_request_line, read_line, read_request_line,
};
use tiny::http::request::Method;

#[tokio::test]
async fn test_parse_simple_get_request() {
    let mut input: &[u8] = b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n";
    let parsed = read_request_line(&mut input, MAX_LINE).await.unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.uri, "/");
    assert_eq!(parsed.version, "HTTP/1.0");
    // headers are still on the stream
    assert_eq!(input, b"Host: example.com\r\n\r\n");
}

#[tokio::test]
async fn test_drain_headers_stops_at_blank_line() {
    let mut input: &[u8] =
        b"Host: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\nleftover";
    let drained = drain_headers(&mut input, MAX_LINE).await.unwrap();

    assert_eq!(drained, 3);
    assert_eq!(input, b"leftover");
}

#[tokio::test]
async fn test_drain_headers_without_terminator_stops_at_eof() {
    let mut input: &[u8] = b"Host: example.com\r\n";
    let drained = drain_headers(&mut input, MAX_LINE).await.unwrap();

    assert_eq!(drained, 1);
    assert!(input.is_empty());
}

#[tokio::test]
async fn test_drain_headers_accepts_bare_newline() {
    let mut input: &[u8] = b"Host: example.com\n\nrest";
    drain_headers(&mut input, MAX_LINE).await.unwrap();

    assert_eq!(input, b"rest");
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let parsed = parse_request_line("GET /cgi-bin/adder?num1=5&num2=3 HTTP/1.0\r\n").unwrap();

    assert_eq!(parsed.uri, "/cgi-bin/adder?num1=5&num2=3");
}

#[test]
fn test_parse_head_lowercase() {
    let parsed = parse_request_line("head /img.png HTTP/1.0").unwrap();

    assert_eq!(parsed.method, Method::HEAD);
}

#[test]
fn test_parse_unsupported_method() {
    let result = parse_request_line("DELETE /x HTTP/1.0\r\n");

    assert!(matches!(result, Err(ParseError::UnsupportedMethod(m)) if m == "DELETE"));
}

#[test]
fn test_parse_blank_request_line() {
    let result = parse_request_line("\r\n");

    assert!(matches!(result, Err(ParseError::UnsupportedMethod(m)) if m.is_empty()));
}

#[tokio::test]
async fn test_request_line_on_closed_stream() {
    let mut input: &[u8] = b"";
    let result = read_request_line(&mut input, MAX_LINE).await;

    assert!(matches!(result, Err(ParseError::ConnectionClosed)));
}

#[tokio::test]
async fn test_oversized_request_line_is_truncated() {
    let mut raw = b"GET /".to_vec();
    raw.extend(std::iter::repeat_n(b'a', 10_000));
    raw.extend_from_slice(b" HTTP/1.0\r\n\r\n");
    let mut input: &[u8] = &raw;

    let line = read_line(&mut input, 64).await.unwrap().unwrap();
    assert_eq!(line.len(), 64);
    assert_eq!(input, b"\r\n");
}

#[tokio::test]
async fn test_non_utf8_request_line_is_lossy() {
    let mut input: &[u8] = b"GET /\xff.html HTTP/1.0\r\n\r\n";
    let parsed = read_request_line(&mut input, MAX_LINE).await.unwrap();

    assert_eq!(parsed.uri, "/\u{fffd}.html");
}
