pub mod catalog;
pub mod memory;
pub mod postgres;

pub use catalog::{CatalogStore, CategoryTrend};
pub use memory::MemoryCatalogStore;
pub use postgres::{create_pool, PgCatalogStore};

#[cfg(test)]
pub use catalog::MockCatalogStore;
