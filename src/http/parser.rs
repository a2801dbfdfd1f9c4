use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Largest header block accepted, request line included.
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

/// Largest body a client may announce through `Content-Length`.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// More bytes are needed before the message can be parsed.
    #[error("incomplete request")]
    Incomplete,
    #[error("header block is not valid UTF-8")]
    InvalidEncoding,
    #[error("invalid request line")]
    InvalidRequestLine,
    #[error("unsupported method")]
    InvalidMethod,
    #[error("path must start with '/'")]
    InvalidPath,
    #[error("unsupported protocol version")]
    InvalidVersion,
    #[error("invalid header line")]
    InvalidHeader,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    #[error("request exceeds size limits")]
    TooLarge,
}

/// Parses one HTTP/1.1 request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied. Yields
/// `ParseError::Incomplete` until both the header terminator and
/// `Content-Length` bytes of body are present. Without a
/// `Content-Length` the body is whatever follows the terminator.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > MAX_HEAD_BYTES => return Err(ParseError::TooLarge),
        None => return Err(ParseError::Incomplete),
    };
    if headers_end > MAX_HEAD_BYTES {
        return Err(ParseError::TooLarge);
    }

    let header_bytes = &buf[..headers_end];
    let body_start = headers_end + HEAD_TERMINATOR.len();
    let body_bytes = &buf[body_start..];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidEncoding)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
    let (method, path, version) = parse_request_line(request_line)?;

    // Headers
    let mut headers = HashMap::new();
    let mut content_length: Option<usize> = None;

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidHeader);
        }

        let value = value.trim();

        // Repeated Content-Length headers, in any casing, must agree
        if key.eq_ignore_ascii_case("Content-Length") {
            let len = value
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength)?;
            if content_length.is_some_and(|prev| prev != len) {
                return Err(ParseError::InvalidContentLength);
            }
            content_length = Some(len);
        }

        headers.insert(key.to_string(), value.to_string());
    }

    // Body

    let (body, consumed) = match content_length {
        Some(len) if len > MAX_BODY_BYTES => return Err(ParseError::TooLarge),
        Some(len) if body_bytes.len() < len => return Err(ParseError::Incomplete),
        Some(len) => (body_bytes[..len].to_vec(), body_start + len),
        None => (body_bytes.to_vec(), buf.len()),
    };

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    Ok((request, consumed))
}

/// Splits `METHOD SP PATH SP HTTP/VERSION` and validates each part.
fn parse_request_line(line: &str) -> Result<(Method, &str, &str), ParseError> {
    let mut parts = line.split(' ');

    let method_str = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let path = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let protocol = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    if parts.next().is_some() {
        return Err(ParseError::InvalidRequestLine);
    }

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    if !path.starts_with('/') {
        return Err(ParseError::InvalidPath);
    }

    let version = protocol
        .strip_prefix("HTTP/")
        .filter(|v| is_version_number(v))
        .ok_or(ParseError::InvalidVersion)?;

    Ok((method, path, version))
}

fn is_version_number(v: &str) -> bool {
    matches!(
        v.as_bytes(),
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit()
    )
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|w| w == HEAD_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.version, "1.1");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn version_shape() {
        assert!(is_version_number("1.1"));
        assert!(is_version_number("1.0"));
        assert!(!is_version_number("11"));
        assert!(!is_version_number("1.1.1"));
        assert!(!is_version_number("x.1"));
    }

    #[test]
    fn oversized_head_without_terminator() {
        let mut req = b"GET / HTTP/1.1\r\nX-Fill: ".to_vec();
        req.resize(MAX_HEAD_BYTES + 1, b'a');

        assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::TooLarge);
    }
}
