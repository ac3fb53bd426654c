//! Order lifecycle on top of a [`DataSource`](crate::core::DataSource)

pub mod cache;
pub mod manager;

pub use cache::DirectoryCache;
pub use manager::OrderManager;
