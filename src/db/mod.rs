//! Persistence: the `Store` contract, a PostgreSQL implementation and an in-memory one.

mod memory;
mod pool;
mod repositories;

pub use memory::MemoryStore;
pub use pool::{create_pool, ensure_schema, DbPool};
pub use repositories::*;
