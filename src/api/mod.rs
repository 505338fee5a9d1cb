// API layer module (HTTP adapters)
// Route composition, middleware, handlers and shared request state

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;
