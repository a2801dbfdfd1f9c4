use tidehttp::http::parser::{MAX_BODY_BYTES, ParseError, parse_http_request};
use tidehttp::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/files/a");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_body_without_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\n\r\nrest";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"rest".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_header_value_split_on_first_colon() {
    let req = b"GET / HTTP/1.1\r\nHost:   localhost:4221\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "localhost:4221");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"DELETE / HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_path_must_be_absolute() {
    let req = b"GET index.html HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidPath)));
}

#[test]
fn test_parse_bad_protocol() {
    for line in ["GET / HTTP/11", "GET / FTP/1.1", "GET / HTTP/1.x"] {
        let req = format!("{line}\r\n\r\n");
        assert_eq!(
            parse_http_request(req.as_bytes()).unwrap_err(),
            ParseError::InvalidVersion,
            "{line}"
        );
    }
}

#[test]
fn test_parse_request_line_shape() {
    for line in ["GET /", "GET  / HTTP/1.1", "GET / HTTP/1.1 extra", ""] {
        let req = format!("{line}\r\n\r\n");
        assert!(parse_http_request(req.as_bytes()).is_err(), "{line:?}");
    }
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: five\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_oversized_body_rejected() {
    let req = format!(
        "POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
        MAX_BODY_BYTES + 1
    );
    let result = parse_http_request(req.as_bytes());

    assert!(matches!(result, Err(ParseError::TooLarge)));
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_is_stateless() {
    let req = b"GET / HTTP/1.1\r\nBroken\r\n\r\n";

    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidHeader);
    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidHeader);
}

#[test]
fn test_parse_lowercase_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\ncontent-length: 3\r\n\r\nab";
    assert!(matches!(parse_http_request(req), Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_conflicting_content_length_rejected() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\ncontent-length: 5\r\n\r\nhello";

    for _ in 0..50 {
        assert_eq!(
            parse_http_request(req).unwrap_err(),
            ParseError::InvalidContentLength
        );
    }
}

#[test]
fn test_parse_repeated_equal_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}
