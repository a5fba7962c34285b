use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::record::Record;
use crate::types::{AccountStatus, Subscription, UserProfile, UserSettings, UserStatus};

/// Outcome of a conditional write.
#[derive(Debug, Clone)]
pub enum WriteOutcome<E> {
    /// The write was applied; the persisted record is returned.
    Written(E),
    /// The stored version no longer matched the expected version.
    Conflict,
    /// The row no longer exists (physically removed by a maintenance path).
    Missing,
}

/// Persistence operations shared by every entity type.
///
/// `fetch` returns soft-deleted rows too: active-only filtering is the
/// lifecycle protocol's job, and maintenance paths need the raw row.
#[async_trait]
pub trait EntityStore<E: Record>: Send + Sync {
    /// Insert a new row. A natural-key collision surfaces as
    /// [`StoreError::Constraint`].
    async fn insert(&self, record: E) -> Result<E, StoreError>;

    /// Point lookup by id, including soft-deleted rows.
    async fn fetch(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Persist `record`, conditioned on the stored version still equalling
    /// `expected_version`. `None` writes unconditionally - the administrative
    /// paths that deliberately bypass the optimistic lock.
    async fn save(
        &self,
        expected_version: Option<i32>,
        record: E,
    ) -> Result<WriteOutcome<E>, StoreError>;
}

/// Lookup by natural uniqueness key, for the entities that have one
/// (profile: `auth_user_id`; settings/status: `user_profile_id`).
#[async_trait]
pub trait NaturalKeyStore<E: Record>: EntityStore<E> {
    /// Lookup by natural key, including soft-deleted rows - the restore path
    /// needs to see them.
    async fn fetch_by_key(&self, key: &str) -> Result<Option<E>, StoreError>;
}

/// Store adapter trait for persistence.
///
/// Combines the per-entity stores with the filtered scans the managers need.
/// Scans exclude soft-deleted rows.
#[async_trait]
pub trait StoreAdapter:
    NaturalKeyStore<UserProfile>
    + NaturalKeyStore<UserSettings>
    + EntityStore<Subscription>
    + NaturalKeyStore<UserStatus>
    + Send
    + Sync
    + 'static
{
    /// Non-deleted profiles, newest first, with the total non-deleted count.
    async fn list_profiles(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserProfile>, u64), StoreError>;

    /// The most recently created active subscription for a profile, if any.
    async fn active_subscription(
        &self,
        user_profile_id: &str,
    ) -> Result<Option<Subscription>, StoreError>;

    /// All non-deleted subscriptions for a profile, newest first.
    async fn subscriptions_for_profile(
        &self,
        user_profile_id: &str,
    ) -> Result<Vec<Subscription>, StoreError>;

    /// Active subscriptions whose end date falls within `[from, until]`,
    /// soonest first.
    async fn subscriptions_expiring_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, StoreError>;

    /// Non-deleted status records in the given moderation state, most recent
    /// action first.
    async fn statuses_in(&self, status: AccountStatus) -> Result<Vec<UserStatus>, StoreError>;
}
