//! Record traits shared by every entity type.
//!
//! The lifecycle protocol accesses entity fields through these trait methods,
//! so one implementation of create/update/soft-delete/restore serves all four
//! record types. [`Record`] is the read-only envelope view; [`LifecycleRecord`]
//! adds the construction and mutation methods the protocol and the in-memory
//! adapter need.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The four entity types owned by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Profile,
    Settings,
    Subscription,
    Status,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Settings => "Settings",
            Self::Subscription => "Subscription",
            Self::Status => "Status",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the lifecycle envelope carried by every record.
pub trait Record: Clone + Send + Sync + Serialize + fmt::Debug + 'static {
    /// Which entity this record type is, used in error reporting.
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn version(&self) -> i32;
    fn is_deleted(&self) -> bool;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Construction and mutation for records driven through the lifecycle
/// protocol.
///
/// `Create` is the creation payload, `Patch` the partial-update payload.
/// Fields absent from a patch are left unchanged.
pub trait LifecycleRecord: Record {
    type Create: Send + Sync;
    type Patch: Send + Sync;

    /// The natural uniqueness key of a creation payload (`auth_user_id` for
    /// profiles, `user_profile_id` for the child entities).
    fn natural_key(create: &Self::Create) -> &str;

    /// Construct a fresh record at version 1.
    fn from_create(id: String, create: &Self::Create, now: DateTime<Utc>) -> Self;

    /// Overwrite fields from a creation payload. Used on the restore path,
    /// where the soft-deleted row keeps its `id` but takes the new values.
    fn apply_create(&mut self, create: &Self::Create);

    /// Apply a partial patch in place.
    fn apply_patch(&mut self, patch: &Self::Patch);

    fn bump_version(&mut self);
    fn touch(&mut self, now: DateTime<Utc>);
    fn mark_deleted(&mut self, at: DateTime<Utc>);
    fn clear_deleted(&mut self);
}
