// Domain layer module exports
// Domain types and repository contracts, independent of HTTP and SQL

pub mod order;
pub mod product;
pub mod repositories;
pub mod user;
