use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use user_records_core::StatusPatch;

/// `user.status.findByUserProfileId` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindByProfilePayload {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
}

/// `user.status.update` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(nested)]
    pub patch: StatusPatch,
}

/// `user.status.suspend` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuspendStatusPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    #[validate(length(min = 1, max = 64))]
    pub actioned_by: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// `user.status.ban` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BanStatusPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    #[validate(length(min = 1, max = 64))]
    pub actioned_by: String,
}
