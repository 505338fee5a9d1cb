// Route composition
// Feature modules register into one shared table, which is then frozen into
// a single immutable axum Router

use std::collections::{BTreeMap, HashMap};

use axum::{
    handler::Handler,
    http::Method,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use thiserror::Error;

use crate::api::errors::ApiError;
use crate::modules::FeatureModule;

/// Startup errors raised while composing module routes
///
/// All of these are programming errors in a module and abort startup.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("{method} {path} is registered by both {first} and {second}")]
    DuplicateRoute {
        method: Method,
        path: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("{path} (module {module}) conflicts with {existing} (module {owner})")]
    ConflictingPath {
        path: String,
        module: &'static str,
        existing: String,
        owner: &'static str,
    },

    #[error("module {module} registered unsupported method {method}")]
    UnsupportedMethod {
        method: Method,
        module: &'static str,
    },

    #[error("module {module} registered invalid path {path:?}")]
    InvalidPath { path: String, module: &'static str },
}

struct PathEntry<S> {
    path: String,
    owner: &'static str,
    methods: HashMap<Method, &'static str>,
    routers: Vec<MethodRouter<S>>,
}

/// Mutable dispatch table handed to each module during composition
///
/// Records which module owns each `(method, path)` pair so a collision is
/// reported instead of one handler shadowing another.
pub struct RouteTable<S> {
    module: &'static str,
    // keyed by path shape, parameter names erased
    paths: BTreeMap<String, PathEntry<S>>,
}

impl<S> RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty table
    pub fn new() -> Self {
        Self {
            module: "unknown",
            paths: BTreeMap::new(),
        }
    }

    /// Attributes subsequent registrations to `module`
    pub fn for_module(&mut self, module: &'static str) -> &mut Self {
        self.module = module;
        self
    }

    /// Binds `handler` to `(method, path)`
    ///
    /// # Errors
    /// * `ComposeError::DuplicateRoute` - the pair is already bound
    /// * `ComposeError::ConflictingPath` - same path shape, different parameter names
    /// * `ComposeError::UnsupportedMethod` - the router cannot dispatch on `method`
    /// * `ComposeError::InvalidPath` - `path` does not start with `/`
    pub fn route<H, T>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, ComposeError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if !path.starts_with('/') {
            return Err(ComposeError::InvalidPath {
                path: path.to_string(),
                module: self.module,
            });
        }

        let filter =
            MethodFilter::try_from(method.clone()).map_err(|_| ComposeError::UnsupportedMethod {
                method: method.clone(),
                module: self.module,
            })?;

        let shape = path_shape(path);
        let module = self.module;

        match self.paths.get_mut(&shape) {
            Some(entry) => {
                if entry.path != path {
                    return Err(ComposeError::ConflictingPath {
                        path: path.to_string(),
                        module,
                        existing: entry.path.clone(),
                        owner: entry.owner,
                    });
                }
                if let Some(&first) = entry.methods.get(&method) {
                    return Err(ComposeError::DuplicateRoute {
                        method,
                        path: path.to_string(),
                        first,
                        second: module,
                    });
                }

                entry.routers.push(on(filter, handler));
                entry.methods.insert(method, module);
            }
            None => {
                if let Some(entry) = self
                    .paths
                    .values()
                    .find(|entry| paths_overlap(&entry.path, path))
                {
                    return Err(ComposeError::ConflictingPath {
                        path: path.to_string(),
                        module,
                        existing: entry.path.clone(),
                        owner: entry.owner,
                    });
                }

                self.paths.insert(
                    shape,
                    PathEntry {
                        path: path.to_string(),
                        owner: module,
                        methods: HashMap::from([(method, module)]),
                        routers: vec![on(filter, handler)],
                    },
                );
            }
        }

        tracing::debug!(module, path, "Route registered");
        Ok(self)
    }

    /// Number of `(method, path)` bindings registered so far
    pub fn len(&self) -> usize {
        self.paths.values().map(|entry| entry.methods.len()).sum()
    }

    /// Whether no module has registered anything yet
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Freezes the table into a router
    ///
    /// Unmatched requests fall through to a JSON 404.
    pub fn into_router(self) -> Router<S> {
        self.paths
            .into_values()
            .fold(Router::new(), |router, entry| {
                let methods = entry
                    .routers
                    .into_iter()
                    .fold(MethodRouter::new(), MethodRouter::merge);
                router.route(&entry.path, methods)
            })
            .fallback(not_found)
    }
}

impl<S> Default for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Composes every module's routes into one handler bound to `state`
///
/// Each module registers exactly once; registration order does not affect the
/// result.
pub fn compose<S>(modules: &[&dyn FeatureModule<S>], state: S) -> Result<Router, ComposeError>
where
    S: Clone + Send + Sync + 'static,
{
    let mut table = RouteTable::new();

    for module in modules {
        table.for_module(module.name());
        module.register_routes(&mut table)?;
    }

    tracing::info!(
        modules = modules.len(),
        routes = table.len(),
        "Routes composed"
    );

    Ok(table.into_router().with_state(state))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Path with parameter names erased: `/products/:id` -> `/products/:`
fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                ":"
            } else if segment.starts_with('*') {
                "*"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether two distinct path shapes would collide inside the router
///
/// At the first segment where they differ, a catch-all on either side or a
/// parameter on both sides is ambiguous. A static segment next to a
/// parameter is not.
fn paths_overlap(existing: &str, candidate: &str) -> bool {
    for (left, right) in existing.split('/').zip(candidate.split('/')) {
        if left == right {
            continue;
        }

        let catch_all = left.starts_with('*') || right.starts_with('*');
        let both_params = left.starts_with(':') && right.starts_with(':');
        return catch_all || both_params;
    }

    false
}
