//! `/files/<name>` storage handlers.
//!
//! File I/O goes through `tokio::fs`, which runs the blocking calls on
//! tokio's blocking pool so the reactor keeps serving other connections.
//! Concurrent writes to the same name are not serialized: last writer wins.

use std::path::PathBuf;

use crate::error::HttpError;
use crate::handlers::HandlerContext;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Rejects names that could escape the storage directory.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Storage path for the requested file name.
fn resolve_path(ctx: &HandlerContext<'_>) -> Result<PathBuf, HttpError> {
    let directory = ctx
        .config
        .directory
        .as_ref()
        .ok_or_else(|| HttpError::ResourceNotFound("no storage directory configured".to_string()))?;

    if !is_safe_name(ctx.param) {
        return Err(HttpError::ResourceNotFound(format!(
            "invalid file name {:?}",
            ctx.param
        )));
    }

    Ok(directory.join(ctx.param))
}

/// Serves the stored file as `application/octet-stream`.
///
/// Every read failure is reported as not found.
pub async fn get(ctx: &HandlerContext<'_>) -> Result<Response, HttpError> {
    let path = resolve_path(ctx)?;

    let contents = tokio::fs::read(&path).await.map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "File read failed");
        HttpError::ResourceNotFound(path.display().to_string())
    })?;

    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/octet-stream")
        .body(contents)
        .build())
}

/// Stores the request body, replacing any existing file.
///
/// An empty body is rejected before touching the filesystem.
pub async fn post(ctx: &HandlerContext<'_>) -> Result<Response, HttpError> {
    let path = resolve_path(ctx)?;

    if ctx.request.body.is_empty() {
        return Err(HttpError::ResourceNotFound("request body".to_string()));
    }

    tokio::fs::write(&path, &ctx.request.body)
        .await
        .map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "File write failed");
            HttpError::StorageWriteFailure(e)
        })?;

    tracing::info!(
        path = %path.display(),
        bytes = ctx.request.body.len(),
        "File stored"
    );

    Ok(Response::empty(StatusCode::Created))
}
