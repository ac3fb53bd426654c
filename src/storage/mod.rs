//! DataSource implementations

pub mod in_memory;
pub mod rest;

pub use in_memory::InMemoryDataSource;
pub use rest::RestDataSource;
