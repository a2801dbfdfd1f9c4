use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout_at};

use crate::error::HttpError;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

/// How long a client may take to deliver a complete request, counted
/// from the first read attempt.
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

const READ_CHUNK: usize = 4096;

/// One client connection: a single request, a single response, then close.
pub struct Connection<S = TcpStream> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What came out of the read phase.
pub enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    /// Peer went away (or stalled) before a full request arrived.
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            router,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    ReadOutcome::Request(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    ReadOutcome::Malformed(e) => {
                        tracing::warn!(error = %e, "Malformed request");
                        let response = Response::empty(HttpError::from(e).status());
                        self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                    }
                    ReadOutcome::Closed => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = self.router.dispatch(req).await;
                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        let deadline = Instant::now() + READ_TIMEOUT;

        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Ok(ReadOutcome::Malformed(e)),
            }

            self.buffer.reserve(READ_CHUNK);
            let n = match timeout_at(deadline, self.stream.read_buf(&mut self.buffer)).await {
                Ok(read) => read?,
                Err(_) => {
                    tracing::debug!("Timed out waiting for request");
                    return Ok(ReadOutcome::Closed);
                }
            };

            if n == 0 {
                // Client closed connection
                return Ok(ReadOutcome::Closed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tokio::io::duplex;

    fn router() -> Arc<Router> {
        Arc::new(Router::new(Arc::new(Config::default())))
    }

    async fn exchange(chunks: &[&[u8]]) -> Vec<u8> {
        let (client, server) = duplex(64 * 1024);
        let task = tokio::spawn(async move {
            let mut conn = Connection::new(server, router());
            conn.run().await
        });

        let (mut rd, mut wr) = tokio::io::split(client);
        for chunk in chunks {
            wr.write_all(chunk).await.unwrap();
            tokio::task::yield_now().await;
        }

        let mut out = Vec::new();
        rd.read_to_end(&mut out).await.unwrap();
        task.await.unwrap().unwrap();
        out
    }

    #[tokio::test]
    async fn request_split_across_reads() {
        let out = exchange(&[
            &b"GET /echo/ab"[..],
            &b"c HTTP/1.1\r\nHost: x\r"[..],
            &b"\n\r\n"[..],
        ]).await;
        assert_eq!(
            out,
            b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nContent-Type: text/plain\r\n\r\nabc"
        );
    }

    #[tokio::test]
    async fn malformed_request_gets_404() {
        let out = exchange(&[&b"BREW /pot HTTP/1.1\r\n\r\n"[..]]).await;
        assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_trickle_hits_request_deadline() {
        let (client, server) = duplex(1024);
        let task = tokio::spawn(async move {
            let mut conn = Connection::new(server, router());
            conn.run().await
        });

        let started = Instant::now();
        let (mut rd, mut wr) = tokio::io::split(client);
        let writer = tokio::spawn(async move {
            for byte in b"GET /echo/abcdefgh HTTP/1.1\r\n" {
                if wr.write_all(&[*byte]).await.is_err() {
                    break;
                }
                tokio::time::sleep(Duration::from_secs(20)).await;
            }
            wr
        });

        task.await.unwrap().unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= READ_TIMEOUT, "closed early after {elapsed:?}");
        assert!(elapsed < READ_TIMEOUT + Duration::from_secs(20), "closed late after {elapsed:?}");

        let mut out = Vec::new();
        rd.read_to_end(&mut out).await.unwrap();
        assert!(out.is_empty());
        writer.abort();
    }

    #[tokio::test]
    async fn peer_closing_early_writes_nothing() {
        let (client, server) = duplex(1024);
        let task = tokio::spawn(async move {
            let mut conn = Connection::new(server, router());
            conn.run().await
        });

        let mut client = client;
        client.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();
        client.shutdown().await.unwrap();

        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        task.await.unwrap().unwrap();
        assert!(out.is_empty());
    }
}
