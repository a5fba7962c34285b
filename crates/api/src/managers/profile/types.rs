use serde::{Deserialize, Serialize};
use validator::Validate;

use user_records_core::{ProfilePatch, Subscription, UserProfile, UserSettings, UserStatus};

/// `user.profile.findByAuthUserId` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindByAuthUserIdPayload {
    #[validate(length(min = 1, max = 64))]
    pub auth_user_id: String,
}

/// `user.profile.update` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(nested)]
    pub patch: ProfilePatch,
}

/// `user.profile.findAll` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FindAllPayload {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// `user.profile.findByIdWithRelations` response: the profile plus its
/// active child records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileWithRelations {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub settings: Option<UserSettings>,
    pub subscriptions: Vec<Subscription>,
    pub status: Option<UserStatus>,
}
