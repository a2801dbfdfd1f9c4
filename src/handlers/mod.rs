//! Route handlers.
//!
//! Every handler turns one request into exactly one outcome: a response
//! or an `HttpError` the router maps to a status. Handlers never write to
//! the socket themselves.

pub mod echo;
pub mod files;
pub mod root;
pub mod user_agent;

use crate::config::Config;
use crate::error::HttpError;
use crate::http::request::Request;
use crate::http::response::Response;

/// Everything a handler may look at.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub request: &'a Request,
    /// Trailing path segment captured by the route pattern, empty if none.
    pub param: &'a str,
    pub config: &'a Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    FilesGet,
    FilesPost,
}

impl Handler {
    pub async fn call(self, ctx: &HandlerContext<'_>) -> Result<Response, HttpError> {
        match self {
            Handler::Root => Ok(root::handle(ctx)),
            Handler::Echo => Ok(echo::handle(ctx)),
            Handler::UserAgent => user_agent::handle(ctx),
            Handler::FilesGet => files::get(ctx).await,
            Handler::FilesPost => files::post(ctx).await,
        }
    }
}
