//! Storefront API Library
//!
//! Bootstrap and composition layer for a small e-commerce HTTP service:
//! storage initialization, ordered schema migration, route composition from
//! independent feature modules, CORS, and the server runner.

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod server;
