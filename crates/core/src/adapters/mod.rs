//! Store adapters: the persistence seam the lifecycle protocol runs against.

pub mod database;
pub mod memory;
pub mod traits;

pub use memory::MemoryStoreAdapter;
pub use traits::{EntityStore, NaturalKeyStore, StoreAdapter, WriteOutcome};

#[cfg(feature = "sqlx-postgres")]
pub use database::{PgStoreAdapter, PoolConfig};
