// Infrastructure layer module
// Database connection, schema migration and repository adapters

pub mod database;
pub mod migrator;
pub mod repositories;
pub mod schema;
