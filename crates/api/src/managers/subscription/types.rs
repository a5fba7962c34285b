use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use user_records_core::SubscriptionStatus;

/// `user.subscription.create` payload. `metadata` is carried on the wire as
/// a JSON-encoded string and parsed by the handler.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionPayload {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
    #[validate(length(min = 1, max = 50))]
    pub plan_type: String,
    pub status: Option<SubscriptionStatus>,
    #[validate(length(max = 50))]
    pub billing_cycle: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_auto_renew: Option<bool>,
    pub is_trial: Option<bool>,
    #[validate(range(min = 1))]
    pub max_devices: Option<i32>,
    #[validate(range(min = 1))]
    pub max_profiles: Option<i32>,
    pub can_download: Option<bool>,
    #[validate(length(max = 20))]
    pub video_quality: Option<String>,
    pub ads_enabled: Option<bool>,
    #[validate(length(max = 255))]
    pub external_subscription_id: Option<String>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    pub metadata: Option<String>,
}

/// Partial update fields for `user.subscription.update`, metadata as a
/// JSON-encoded string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPatchPayload {
    #[validate(length(min = 1, max = 50))]
    pub plan_type: Option<String>,
    pub status: Option<SubscriptionStatus>,
    #[validate(length(max = 50))]
    pub billing_cycle: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_auto_renew: Option<bool>,
    pub is_trial: Option<bool>,
    #[validate(range(min = 1))]
    pub max_devices: Option<i32>,
    #[validate(range(min = 1))]
    pub max_profiles: Option<i32>,
    pub can_download: Option<bool>,
    #[validate(length(max = 20))]
    pub video_quality: Option<String>,
    pub ads_enabled: Option<bool>,
    #[validate(length(max = 255))]
    pub external_subscription_id: Option<String>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    pub metadata: Option<String>,
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

/// `user.subscription.update` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSubscriptionPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(nested)]
    pub patch: SubscriptionPatchPayload,
}

/// `user.subscription.findActiveByUserProfileId` /
/// `user.subscription.findAllByUserProfileId` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindByProfilePayload {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
}

/// `user.subscription.suspend` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuspendSubscriptionPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// `user.subscription.findExpiringSoon` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FindExpiringPayload {
    #[validate(range(min = 0, max = 3650))]
    pub days: Option<i64>,
}

/// `user.subscription.checkExpiration` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckExpirationResponse {
    pub is_expired: bool,
}
