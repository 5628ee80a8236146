pub mod id_allocator;
pub mod memory;
pub mod postgres;
pub mod storage;

#[cfg(test)]
pub(crate) mod contract;

pub use memory::MemStorage;
pub use postgres::PgStorage;
pub use storage::Storage;
