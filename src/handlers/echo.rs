use crate::handlers::HandlerContext;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Echoes the captured path segment as a `text/plain` body, gzip-encoded
/// when the client lists gzip in `Accept-Encoding`.
pub fn handle(ctx: &HandlerContext<'_>) -> Response {
    let builder = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(ctx.param.as_bytes());

    if ctx.request.accepts_encoding("gzip") {
        builder.gzip().build()
    } else {
        builder.build()
    }
}
