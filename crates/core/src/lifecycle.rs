//! The shared entity lifecycle protocol.
//!
//! One implementation of create / optimistic-locked update / soft-delete /
//! restore serves all four entity types, parameterized by the
//! [`LifecycleRecord`] trait. Each record manager drives these functions with
//! its own entity type rather than inheriting from a base implementation.
//!
//! Concurrency: conflicting writers are detected after the fact through the
//! version counter compared at write time ([`EntityStore::save`]); the
//! protocol itself holds no locks, performs no waiting, and never retries.

use chrono::Utc;
use uuid::Uuid;

use crate::adapters::{EntityStore, NaturalKeyStore, WriteOutcome};
use crate::error::{ServiceError, ServiceResult, StoreError};
use crate::record::{LifecycleRecord, Record};

/// Create a record with a unique natural key, restoring a soft-deleted match
/// instead of inserting a new row.
///
/// Outcomes, mutually exclusive and checked in order:
/// 1. an active record with the same natural key exists → `Duplicate`;
/// 2. a soft-deleted record with the same natural key exists → it is revived
///    in place: delete marker cleared, payload fields applied, version +1;
/// 3. otherwise a fresh record is inserted at version 1.
///
/// The check-then-insert race is closed by the store's uniqueness constraint:
/// a [`StoreError::Constraint`] from the insert is reported as `Duplicate`.
pub async fn create_or_restore<E, S>(store: &S, create: &E::Create) -> ServiceResult<E>
where
    E: LifecycleRecord,
    S: NaturalKeyStore<E>,
{
    let key = E::natural_key(create);

    if let Some(existing) = store.fetch_by_key(key).await? {
        if !existing.is_deleted() {
            return Err(ServiceError::duplicate(E::KIND, key));
        }

        tracing::info!(kind = %E::KIND, id = %existing.id(), "restoring soft-deleted record");

        let expected = existing.version();
        let mut restored = existing;
        restored.clear_deleted();
        restored.apply_create(create);
        restored.bump_version();
        restored.touch(Utc::now());

        return match store.save(Some(expected), restored).await? {
            WriteOutcome::Written(record) => Ok(record),
            // A concurrent writer revived or mutated the row first.
            WriteOutcome::Conflict => Err(ServiceError::duplicate(E::KIND, key)),
            WriteOutcome::Missing => Err(ServiceError::not_found(E::KIND, key)),
        };
    }

    insert_new(store, create).await
}

/// Create a record without a duplicate/restore check, for entity types whose
/// natural key is not unique (subscriptions).
pub async fn create<E, S>(store: &S, create: &E::Create) -> ServiceResult<E>
where
    E: LifecycleRecord,
    S: EntityStore<E>,
{
    insert_new(store, create).await
}

async fn insert_new<E, S>(store: &S, create: &E::Create) -> ServiceResult<E>
where
    E: LifecycleRecord,
    S: EntityStore<E>,
{
    let record = E::from_create(Uuid::new_v4().to_string(), create, Utc::now());
    match store.insert(record).await {
        Ok(record) => Ok(record),
        Err(StoreError::Constraint(_)) => {
            // Lost a simultaneous create for the same natural key.
            Err(ServiceError::duplicate(E::KIND, E::natural_key(create)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch a record by id, treating soft-deleted rows as absent.
pub async fn find_active<E, S>(store: &S, id: &str) -> ServiceResult<E>
where
    E: Record,
    S: EntityStore<E>,
{
    match store.fetch(id).await? {
        Some(record) if !record.is_deleted() => Ok(record),
        _ => Err(ServiceError::not_found(E::KIND, id)),
    }
}

/// Fetch a record by natural key, treating soft-deleted rows as absent.
pub async fn find_active_by_key<E, S>(store: &S, key: &str) -> ServiceResult<E>
where
    E: Record,
    S: NaturalKeyStore<E>,
{
    match store.fetch_by_key(key).await? {
        Some(record) if !record.is_deleted() => Ok(record),
        _ => Err(ServiceError::not_found(E::KIND, key)),
    }
}

/// Apply a partial patch under optimistic locking.
///
/// When the caller supplies `expected_version` and it differs from the
/// current version, the update is rejected with `VersionConflict` and nothing
/// is written. The physical write is additionally conditioned on the version
/// read in step one, so a writer racing in between the check and the write
/// also surfaces as `VersionConflict` instead of a lost update.
pub async fn update<E, S>(
    store: &S,
    id: &str,
    patch: &E::Patch,
    expected_version: Option<i32>,
) -> ServiceResult<E>
where
    E: LifecycleRecord,
    S: EntityStore<E>,
{
    let current = find_active(store, id).await?;

    if let Some(expected) = expected_version {
        if expected != current.version() {
            tracing::warn!(kind = %E::KIND, id, expected, actual = current.version(),
                "stale version supplied, rejecting update");
            return Err(ServiceError::version_conflict(E::KIND));
        }
    }

    let read_version = current.version();
    let mut updated = current;
    updated.apply_patch(patch);
    updated.bump_version();
    updated.touch(Utc::now());

    match store.save(Some(read_version), updated).await? {
        WriteOutcome::Written(record) => Ok(record),
        WriteOutcome::Conflict => Err(ServiceError::version_conflict(E::KIND)),
        WriteOutcome::Missing => Err(ServiceError::not_found(E::KIND, id)),
    }
}

/// Soft-delete a record: the row is retained but logically absent from every
/// active lookup. Deleting an already-deleted record yields `NotFound`.
pub async fn soft_delete<E, S>(store: &S, id: &str) -> ServiceResult<()>
where
    E: LifecycleRecord,
    S: EntityStore<E>,
{
    let current: E = find_active(store, id).await?;

    let now = Utc::now();
    let mut deleted = current;
    deleted.mark_deleted(now);
    deleted.bump_version();
    deleted.touch(now);

    match store.save(None, deleted).await? {
        WriteOutcome::Written(_) => Ok(()),
        WriteOutcome::Conflict | WriteOutcome::Missing => Err(ServiceError::not_found(E::KIND, id)),
    }
}

/// Apply an administrative transition: fetch the active record, let the
/// closure mutate it, bump the version, and write unconditionally.
///
/// Unlike [`update`], no caller-supplied version gates the write - admin
/// actions intentionally win over concurrent user-initiated updates.
pub async fn apply_transition<E, S, F>(store: &S, id: &str, mutate: F) -> ServiceResult<E>
where
    E: LifecycleRecord,
    S: EntityStore<E>,
    F: FnOnce(&mut E),
{
    let current: E = find_active(store, id).await?;

    let mut next = current;
    mutate(&mut next);
    next.bump_version();
    next.touch(Utc::now());

    match store.save(None, next).await? {
        WriteOutcome::Written(record) => Ok(record),
        WriteOutcome::Conflict | WriteOutcome::Missing => Err(ServiceError::not_found(E::KIND, id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStoreAdapter;
    use crate::types::{CreateProfile, ProfilePatch, UserProfile};

    fn profile_create(auth_user_id: &str) -> CreateProfile {
        CreateProfile {
            auth_user_id: auth_user_id.to_string(),
            display_name: Some("Ada".to_string()),
            first_name: None,
            last_name: None,
            avatar: None,
            bio: None,
            country: None,
            date_of_birth: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn create_starts_at_version_one() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();
        assert_eq!(profile.version, 1);
        assert!(!profile.is_deleted);
    }

    #[tokio::test]
    async fn duplicate_active_record_rejected() {
        let store = MemoryStoreAdapter::new();
        let _: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        let err = create_or_restore::<UserProfile, _>(&store, &profile_create("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn restore_takes_priority_over_fresh_insert() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();
        soft_delete::<UserProfile, _>(&store, &profile.id)
            .await
            .unwrap();

        let mut recreate = profile_create("u1");
        recreate.display_name = Some("Grace".to_string());
        let restored: UserProfile = create_or_restore(&store, &recreate).await.unwrap();

        // Same row revived, not a new one.
        assert_eq!(restored.id, profile.id);
        assert!(!restored.is_deleted);
        assert_eq!(restored.deleted_at, None);
        assert_eq!(restored.display_name.as_deref(), Some("Grace"));
        // v1 create, v2 delete, v3 restore.
        assert_eq!(restored.version, 3);
    }

    #[tokio::test]
    async fn update_applies_partial_patch_and_bumps_version() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        let patch = ProfilePatch {
            bio: Some("hello".to_string()),
            ..Default::default()
        };
        let updated: UserProfile = update(&store, &profile.id, &patch, None).await.unwrap();

        assert_eq!(updated.version, profile.version + 1);
        assert_eq!(updated.bio.as_deref(), Some("hello"));
        // Untouched field survives the patch.
        assert_eq!(updated.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn stale_expected_version_rejected_without_write() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        let patch = ProfilePatch {
            bio: Some("stale write".to_string()),
            ..Default::default()
        };
        let err = update::<UserProfile, _>(&store, &profile.id, &patch, Some(profile.version + 7))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::VersionConflict(_)));

        // The stored record is unchanged.
        let current: UserProfile = find_active(&store, &profile.id).await.unwrap();
        assert_eq!(current.version, profile.version);
        assert_eq!(current.bio, None);
    }

    #[tokio::test]
    async fn matching_expected_version_accepted() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        let patch = ProfilePatch {
            bio: Some("locked".to_string()),
            ..Default::default()
        };
        let updated: UserProfile = update(&store, &profile.id, &patch, Some(profile.version))
            .await
            .unwrap();
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn soft_delete_hides_record_but_keeps_row() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        soft_delete::<UserProfile, _>(&store, &profile.id)
            .await
            .unwrap();

        let err = find_active::<UserProfile, _>(&store, &profile.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));

        // Maintenance path still sees the physical row.
        let raw = EntityStore::<UserProfile>::fetch(&store, &profile.id)
            .await
            .unwrap()
            .unwrap();
        assert!(raw.is_deleted);
        assert!(raw.deleted_at.is_some());
        assert_eq!(raw.version, 2);
    }

    #[tokio::test]
    async fn second_soft_delete_reports_not_found() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        soft_delete::<UserProfile, _>(&store, &profile.id)
            .await
            .unwrap();
        let err = soft_delete::<UserProfile, _>(&store, &profile.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn transition_bumps_version_without_expected_version() {
        let store = MemoryStoreAdapter::new();
        let profile: UserProfile = create_or_restore(&store, &profile_create("u1"))
            .await
            .unwrap();

        let after: UserProfile = apply_transition(&store, &profile.id, |p: &mut UserProfile| {
            p.bio = Some("stamped by admin".to_string());
        })
        .await
        .unwrap();
        assert_eq!(after.version, 2);
        assert_eq!(after.bio.as_deref(), Some("stamped by admin"));
    }
}
