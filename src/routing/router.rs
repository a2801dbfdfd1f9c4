use std::sync::Arc;

use crate::config::Config;
use crate::error::HttpError;
use crate::handlers::{Handler, HandlerContext};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::routing::pattern::Pattern;

/// How a matched route picks its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// One handler, GET only.
    Single(Handler),
    /// One handler per allowed method.
    ByMethod(Vec<(Method, Handler)>),
}

impl Dispatch {
    fn handler_for(&self, method: Method) -> Option<Handler> {
        match self {
            Dispatch::Single(handler) => (method == Method::GET).then_some(*handler),
            Dispatch::ByMethod(handlers) => handlers
                .iter()
                .find(|(m, _)| *m == method)
                .map(|(_, handler)| *handler),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub pattern: Pattern,
    pub dispatch: Dispatch,
}

impl Route {
    /// A GET-only route.
    pub fn get(pattern: Pattern, handler: Handler) -> Self {
        Self {
            pattern,
            dispatch: Dispatch::Single(handler),
        }
    }

    pub fn methods(pattern: Pattern, handlers: impl Into<Vec<(Method, Handler)>>) -> Self {
        Self {
            pattern,
            dispatch: Dispatch::ByMethod(handlers.into()),
        }
    }
}

/// Handler picked for a request, with its captured path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub handler: Handler,
    pub param: &'a str,
}

/// Route table plus the configuration handed to every handler.
///
/// Built once at startup and shared read-only across connections.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    config: Arc<Config>,
}

impl Router {
    /// The server's route table, in matching order.
    pub fn new(config: Arc<Config>) -> Self {
        let routes = vec![
            Route::get(Pattern::exact("/"), Handler::Root),
            Route::get(Pattern::exact("/index.html"), Handler::Root),
            Route::get(Pattern::segment("/echo/", "value"), Handler::Echo),
            Route::get(Pattern::exact("/user-agent"), Handler::UserAgent),
            Route::methods(
                Pattern::segment("/files/", "name"),
                [
                    (Method::GET, Handler::FilesGet),
                    (Method::POST, Handler::FilesPost),
                ],
            ),
        ];
        Self::with_routes(routes, config)
    }

    pub fn with_routes(routes: Vec<Route>, config: Arc<Config>) -> Self {
        Self { routes, config }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the handler for `req`.
    ///
    /// The first matching pattern decides: a method it does not allow is
    /// `MethodNotAllowed` even if a later pattern would also match.
    pub fn resolve<'a>(&self, req: &'a Request) -> Result<Resolved<'a>, HttpError> {
        let (route, matched) = self
            .routes
            .iter()
            .find_map(|route| route.pattern.matches(&req.path).map(|m| (route, m)))
            .ok_or_else(|| HttpError::RouteNotFound(req.path.clone()))?;

        let handler = route
            .dispatch
            .handler_for(req.method)
            .ok_or_else(|| HttpError::MethodNotAllowed(format!("{} {}", req.method, route.pattern)))?;

        Ok(Resolved {
            handler,
            param: matched.param.unwrap_or(""),
        })
    }

    /// Routes `req` and returns the single response it gets.
    pub async fn dispatch(&self, req: &Request) -> Response {
        let outcome = match self.resolve(req) {
            Ok(resolved) => {
                let ctx = HandlerContext {
                    request: req,
                    param: resolved.param,
                    config: &self.config,
                };
                resolved.handler.call(&ctx).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(
                    method = %req.method,
                    path = %req.path,
                    error = %e,
                    "Request rejected"
                );
                Response::empty(e.status())
            }
        }
    }
}
