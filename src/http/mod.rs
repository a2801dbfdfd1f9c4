//! HTTP protocol implementation.
//!
//! A minimal HTTP/1.1 server: one request per connection, no keep-alive,
//! no chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving read, dispatch and write
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and header helpers
//! - **`response`**: Response descriptor with builder pattern
//! - **`codec`**: Content codings (gzip) applied to response bodies
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer bytes until a full request is present
//!        └──────┬──────┘
//!               │ Request received (or malformed → 404)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```

pub mod codec;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
