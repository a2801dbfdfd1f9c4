use std::collections::BTreeMap;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::codec::ContentEncoding;
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Applies the negotiated encoding to the body, falling back to identity
/// if the encoder fails.
fn encode_body(body: &[u8], encoding: ContentEncoding) -> (Vec<u8>, ContentEncoding) {
    match encoding.encode(body) {
        Ok(encoded) => (encoded, encoding),
        Err(e) => {
            tracing::warn!(error = %e, ?encoding, "Body encoding failed, sending identity");
            (body.to_vec(), ContentEncoding::Identity)
        }
    }
}

/// Renders a response to its exact wire bytes.
///
/// `Content-Length` always matches the transmitted (possibly compressed)
/// body; it and `Content-Encoding` are computed here and replace any
/// handler-supplied values. Other handler headers are emitted as given.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut headers: BTreeMap<&str, String> = resp
        .headers
        .iter()
        .filter(|(k, _)| {
            !k.eq_ignore_ascii_case("Content-Length") && !k.eq_ignore_ascii_case("Content-Encoding")
        })
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();

    let body = resp.body.as_deref().map(|body| {
        let (encoded, applied) = encode_body(body, resp.encoding);
        if let Some(value) = applied.header_value() {
            headers.insert("Content-Encoding", value.to_string());
        }
        headers.insert("Content-Length", encoded.len().to_string());
        encoded
    });

    let mut buf = Vec::with_capacity(128 + body.as_ref().map_or(0, Vec::len));

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    if let Some(body) = body {
        buf.extend_from_slice(&body);
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
