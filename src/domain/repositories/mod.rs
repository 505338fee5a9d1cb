// Repository contracts implemented by the infrastructure layer

pub mod error;
pub mod order_repository;
pub mod product_repository;
pub mod user_repository;

pub use error::RepositoryError;
pub use order_repository::OrderRepository;
pub use product_repository::ProductRepository;
pub use user_repository::UserRepository;
