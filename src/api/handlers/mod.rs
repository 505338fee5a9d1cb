// Request handlers, one file per feature module

pub mod orders;
pub mod products;
pub mod system;
pub mod users;
