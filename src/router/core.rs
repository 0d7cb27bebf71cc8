//! Route table: registration and lookup.

use super::pattern::{compile_pattern, CompiledPattern, PatternError};
use crate::server::{Request, ResponseSink};
use http::Method;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted path parameters as (name, value) pairs, in pattern order.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Callable shared by handlers and filters.
pub type Handler = Arc<dyn Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync>;

/// A registered route. Immutable once added to a [`Router`].
pub struct Route {
    pub method: Method,
    pub pattern: String,
    pub(crate) compiled: CompiledPattern,
    pub(crate) handler: Handler,
}

impl Route {
    /// Parameter names, indexed by capture position.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.compiled.param_names
    }

    /// The compiled matcher source.
    #[must_use]
    pub fn expression(&self) -> &str {
        self.compiled.as_str()
    }

    /// Match `path` in full, returning the captured parameters.
    ///
    /// The regex is only left-anchored, so a match that stops short of the end of the
    /// path is rejected here.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<ParamVec> {
        let captures = self.compiled.regex.captures(path)?;
        let whole = captures.get(0)?;
        if whole.as_str().len() != path.len() {
            return None;
        }
        let mut params = ParamVec::new();
        for (i, name) in self.compiled.param_names.iter().enumerate() {
            let value = captures.get(i + 1).map_or("", |m| m.as_str());
            params.push((Arc::clone(name), value.to_string()));
        }
        Some(params)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("expression", &self.expression())
            .field("param_names", &self.param_names())
            .finish_non_exhaustive()
    }
}

/// Result of matching a request against the table.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    /// Position of the route in registration order
    pub index: usize,
    pub path_params: ParamVec,
}

impl RouteMatch<'_> {
    /// Get a path parameter by name. Duplicate names resolve to the last occurrence.
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered route table plus the filter chain run before every matched handler.
///
/// Build it once at startup, then share it read-only (typically behind an `Arc`).
#[derive(Default)]
pub struct Router {
    pub(crate) routes: Vec<Route>,
    pub(crate) filters: Vec<Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append a route for it.
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the pattern does not compile; the table is left
    /// unchanged.
    pub fn try_add_route<F>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: F,
    ) -> Result<(), PatternError>
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        let compiled = compile_pattern(pattern)?;
        info!(
            method = %method,
            pattern = %pattern,
            expression = %compiled.as_str(),
            params = ?compiled.param_names,
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(Route {
            method,
            pattern: pattern.to_string(),
            compiled,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Compile `pattern` and append a route for it.
    ///
    /// # Panics
    ///
    /// Panics if the pattern does not compile. Route tables are fixed at startup, so a
    /// bad pattern is a programming error and aborts before serving begins. Use
    /// [`Router::try_add_route`] to handle the error instead.
    #[allow(clippy::panic)]
    pub fn add_route<F>(&mut self, method: Method, pattern: &str, handler: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        if let Err(err) = self.try_add_route(method.clone(), pattern, handler) {
            error!(method = %method, pattern = %pattern, error = %err, "Invalid route pattern");
            panic!("invalid route {method} {pattern}: {err}");
        }
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.add_route(Method::GET, pattern, handler);
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.add_route(Method::PUT, pattern, handler);
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.add_route(Method::DELETE, pattern, handler);
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.add_route(Method::PATCH, pattern, handler);
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.add_route(Method::POST, pattern, handler);
    }

    /// Append a filter. Filters run in registration order before the matched handler.
    pub fn add_filter<F>(&mut self, filter: F)
    where
        F: Fn(&mut Request, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
        debug!(filters_count = self.filters.len(), "Filter registered");
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route whose method matches and whose pattern covers the whole
    /// path. Registration order decides between overlapping patterns.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        for (index, route) in self.routes.iter().enumerate() {
            if route.method != *method {
                continue;
            }
            match route.match_path(path) {
                Some(path_params) => {
                    debug!(
                        method = %method,
                        path = %path,
                        pattern = %route.pattern,
                        position = index,
                        "Route matched"
                    );
                    return Some(RouteMatch {
                        route,
                        index,
                        path_params,
                    });
                }
                None => continue,
            }
        }
        debug!(method = %method, path = %path, "No route matched");
        None
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("filters", &self.filters.len())
            .finish()
    }
}
