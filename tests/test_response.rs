use tiny::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not found");
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not implemented");
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", "Tiny Web Server")
        .header("Connection", "close")
        .header("Content-type", "text/plain")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Server", "Connection", "Content-type"]);
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    assert_eq!(response.content_length(), Some(body.len() as u64));
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    // HEAD responses announce a length with no body attached
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-length", "2048")
        .body(Vec::new())
        .build();

    assert_eq!(response.content_length(), Some(2048));
    assert_eq!(response.headers.len(), 1);
}

#[test]
fn test_response_without_body_has_no_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", "Tiny Web Server")
        .build();

    assert_eq!(response.content_length(), None);
    assert!(response.body.is_empty());
}

#[test]
fn test_response_header_lookup_is_case_insensitive() {
    let response: Response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Content-type", "text/html")
        .build();

    assert_eq!(response.header("content-TYPE"), Some("text/html"));
    assert_eq!(response.header("Missing"), None);
}
