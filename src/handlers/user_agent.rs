use crate::error::HttpError;
use crate::handlers::HandlerContext;
use crate::http::response::Response;

pub fn handle(ctx: &HandlerContext<'_>) -> Result<Response, HttpError> {
    let agent = ctx
        .request
        .header("User-Agent")
        .ok_or_else(|| HttpError::ResourceNotFound("User-Agent header".to_string()))?;

    Ok(Response::text(agent))
}
