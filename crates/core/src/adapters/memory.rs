use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::record::Record;
use crate::types::{AccountStatus, Subscription, SubscriptionStatus, UserProfile, UserSettings, UserStatus};

use super::traits::{EntityStore, NaturalKeyStore, StoreAdapter, WriteOutcome};

/// In-memory store adapter for testing and development.
///
/// Natural-key indexes stand in for the uniqueness constraints a relational
/// backing store would enforce, so the create/restore race behaves the same
/// way against this adapter as against PostgreSQL. Soft-deleted rows stay in
/// the maps; only the lifecycle protocol filters them.
#[derive(Default)]
pub struct MemoryStoreAdapter {
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
    auth_user_index: Arc<Mutex<HashMap<String, String>>>,
    settings: Arc<Mutex<HashMap<String, UserSettings>>>,
    settings_profile_index: Arc<Mutex<HashMap<String, String>>>,
    subscriptions: Arc<Mutex<HashMap<String, Subscription>>>,
    statuses: Arc<Mutex<HashMap<String, UserStatus>>>,
    status_profile_index: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Replace the stored row if the version precondition holds.
fn save_in_map<E: Record>(
    map: &mut HashMap<String, E>,
    expected_version: Option<i32>,
    record: E,
) -> WriteOutcome<E> {
    match map.get_mut(record.id()) {
        None => WriteOutcome::Missing,
        Some(stored) => {
            if let Some(expected) = expected_version {
                if stored.version() != expected {
                    return WriteOutcome::Conflict;
                }
            }
            *stored = record.clone();
            WriteOutcome::Written(record)
        }
    }
}

// ── Profiles ──

#[async_trait]
impl EntityStore<UserProfile> for MemoryStoreAdapter {
    async fn insert(&self, record: UserProfile) -> Result<UserProfile, StoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        let mut index = self.auth_user_index.lock().unwrap();

        if index.contains_key(&record.auth_user_id) {
            return Err(StoreError::Constraint(format!(
                "duplicate key: user_profiles.auth_user_id = {}",
                record.auth_user_id
            )));
        }

        index.insert(record.auth_user_id.clone(), record.id.clone());
        profiles.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.get(id).cloned())
    }

    async fn save(
        &self,
        expected_version: Option<i32>,
        record: UserProfile,
    ) -> Result<WriteOutcome<UserProfile>, StoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(save_in_map(&mut profiles, expected_version, record))
    }
}

#[async_trait]
impl NaturalKeyStore<UserProfile> for MemoryStoreAdapter {
    async fn fetch_by_key(&self, key: &str) -> Result<Option<UserProfile>, StoreError> {
        let index = self.auth_user_index.lock().unwrap();
        let profiles = self.profiles.lock().unwrap();
        Ok(index.get(key).and_then(|id| profiles.get(id)).cloned())
    }
}

// ── Settings ──

#[async_trait]
impl EntityStore<UserSettings> for MemoryStoreAdapter {
    async fn insert(&self, record: UserSettings) -> Result<UserSettings, StoreError> {
        let mut settings = self.settings.lock().unwrap();
        let mut index = self.settings_profile_index.lock().unwrap();

        if index.contains_key(&record.user_profile_id) {
            return Err(StoreError::Constraint(format!(
                "duplicate key: user_settings.user_profile_id = {}",
                record.user_profile_id
            )));
        }

        index.insert(record.user_profile_id.clone(), record.id.clone());
        settings.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<UserSettings>, StoreError> {
        let settings = self.settings.lock().unwrap();
        Ok(settings.get(id).cloned())
    }

    async fn save(
        &self,
        expected_version: Option<i32>,
        record: UserSettings,
    ) -> Result<WriteOutcome<UserSettings>, StoreError> {
        let mut settings = self.settings.lock().unwrap();
        Ok(save_in_map(&mut settings, expected_version, record))
    }
}

#[async_trait]
impl NaturalKeyStore<UserSettings> for MemoryStoreAdapter {
    async fn fetch_by_key(&self, key: &str) -> Result<Option<UserSettings>, StoreError> {
        let index = self.settings_profile_index.lock().unwrap();
        let settings = self.settings.lock().unwrap();
        Ok(index.get(key).and_then(|id| settings.get(id)).cloned())
    }
}

// ── Subscriptions ──

#[async_trait]
impl EntityStore<Subscription> for MemoryStoreAdapter {
    async fn insert(&self, record: Subscription) -> Result<Subscription, StoreError> {
        // No uniqueness constraint: a profile may hold many subscriptions.
        let mut subscriptions = self.subscriptions.lock().unwrap();
        subscriptions.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<Subscription>, StoreError> {
        let subscriptions = self.subscriptions.lock().unwrap();
        Ok(subscriptions.get(id).cloned())
    }

    async fn save(
        &self,
        expected_version: Option<i32>,
        record: Subscription,
    ) -> Result<WriteOutcome<Subscription>, StoreError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        Ok(save_in_map(&mut subscriptions, expected_version, record))
    }
}

// ── Statuses ──

#[async_trait]
impl EntityStore<UserStatus> for MemoryStoreAdapter {
    async fn insert(&self, record: UserStatus) -> Result<UserStatus, StoreError> {
        let mut statuses = self.statuses.lock().unwrap();
        let mut index = self.status_profile_index.lock().unwrap();

        if index.contains_key(&record.user_profile_id) {
            return Err(StoreError::Constraint(format!(
                "duplicate key: user_statuses.user_profile_id = {}",
                record.user_profile_id
            )));
        }

        index.insert(record.user_profile_id.clone(), record.id.clone());
        statuses.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<UserStatus>, StoreError> {
        let statuses = self.statuses.lock().unwrap();
        Ok(statuses.get(id).cloned())
    }

    async fn save(
        &self,
        expected_version: Option<i32>,
        record: UserStatus,
    ) -> Result<WriteOutcome<UserStatus>, StoreError> {
        let mut statuses = self.statuses.lock().unwrap();
        Ok(save_in_map(&mut statuses, expected_version, record))
    }
}

#[async_trait]
impl NaturalKeyStore<UserStatus> for MemoryStoreAdapter {
    async fn fetch_by_key(&self, key: &str) -> Result<Option<UserStatus>, StoreError> {
        let index = self.status_profile_index.lock().unwrap();
        let statuses = self.statuses.lock().unwrap();
        Ok(index.get(key).and_then(|id| statuses.get(id)).cloned())
    }
}

// ── Scans ──

#[async_trait]
impl StoreAdapter for MemoryStoreAdapter {
    async fn list_profiles(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserProfile>, u64), StoreError> {
        let profiles = self.profiles.lock().unwrap();
        let mut active: Vec<UserProfile> = profiles
            .values()
            .filter(|p| !p.is_deleted)
            .cloned()
            .collect();
        active.sort_by_key(|p| Reverse(p.created_at));

        let total = active.len() as u64;
        let page = active
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn active_subscription(
        &self,
        user_profile_id: &str,
    ) -> Result<Option<Subscription>, StoreError> {
        let subscriptions = self.subscriptions.lock().unwrap();
        Ok(subscriptions
            .values()
            .filter(|s| {
                s.user_profile_id == user_profile_id
                    && s.status == SubscriptionStatus::Active
                    && !s.is_deleted
            })
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn subscriptions_for_profile(
        &self,
        user_profile_id: &str,
    ) -> Result<Vec<Subscription>, StoreError> {
        let subscriptions = self.subscriptions.lock().unwrap();
        let mut found: Vec<Subscription> = subscriptions
            .values()
            .filter(|s| s.user_profile_id == user_profile_id && !s.is_deleted)
            .cloned()
            .collect();
        found.sort_by_key(|s| Reverse(s.created_at));
        Ok(found)
    }

    async fn subscriptions_expiring_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, StoreError> {
        let subscriptions = self.subscriptions.lock().unwrap();
        let mut expiring: Vec<Subscription> = subscriptions
            .values()
            .filter(|s| {
                s.status == SubscriptionStatus::Active
                    && !s.is_deleted
                    && s.end_date.is_some_and(|end| end >= from && end <= until)
            })
            .cloned()
            .collect();
        expiring.sort_by_key(|s| s.end_date);
        Ok(expiring)
    }

    async fn statuses_in(&self, status: AccountStatus) -> Result<Vec<UserStatus>, StoreError> {
        let statuses = self.statuses.lock().unwrap();
        let mut found: Vec<UserStatus> = statuses
            .values()
            .filter(|s| s.status == status && !s.is_deleted)
            .cloned()
            .collect();
        found.sort_by_key(|s| Reverse(s.actioned_at));
        Ok(found)
    }
}
