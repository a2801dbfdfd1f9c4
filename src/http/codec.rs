//! Body content codings.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Content coding applied to a response body on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentEncoding {
    #[default]
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// Value for the `Content-Encoding` header, `None` for identity.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentEncoding::Identity => None,
            ContentEncoding::Gzip => Some("gzip"),
        }
    }

    /// Encodes `body` with this coding.
    pub fn encode(&self, body: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Identity => Ok(body.to_vec()),
            ContentEncoding::Gzip => gzip(body),
        }
    }
}

/// Compresses `data` into a complete gzip member.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
