//! Tidehttp - minimal HTTP/1.1 server
//!
//! Core library: request parsing, routing, handlers and response
//! serialization on top of raw tokio sockets.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod routing;
pub mod server;
