use crate::handlers::HandlerContext;
use crate::http::response::{Response, StatusCode};

pub fn handle(_ctx: &HandlerContext<'_>) -> Response {
    Response::empty(StatusCode::Ok)
}
