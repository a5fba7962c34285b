//! # User Records Core
//!
//! Core abstractions for the user-records service: domain types, the shared
//! entity lifecycle protocol (optimistic locking, soft-delete, restore), and
//! the store adapter traits with in-memory and PostgreSQL implementations.

pub mod adapters;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod record;
pub mod types;
pub mod types_impls;

// Re-export commonly used items
pub use adapters::{EntityStore, MemoryStoreAdapter, NaturalKeyStore, StoreAdapter, WriteOutcome};
#[cfg(feature = "sqlx-postgres")]
pub use adapters::{PgStoreAdapter, PoolConfig};
pub use config::ServiceConfig;
pub use error::{validate_payload, ServiceError, ServiceResult, StoreError};
pub use record::{EntityKind, LifecycleRecord, Record};
pub use types::{
    AccountStatus, CreateProfile, CreateSettings, CreateStatus, CreateSubscription, Paginated,
    ProfilePatch, SettingsPatch, StatusPatch, Subscription, SubscriptionPatch, SubscriptionStatus,
    UserProfile, UserSettings, UserStatus,
};
