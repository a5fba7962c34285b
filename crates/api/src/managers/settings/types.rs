use serde::{Deserialize, Serialize};
use validator::Validate;

use user_records_core::SettingsPatch;

/// `user.settings.findByUserProfileId` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindByProfilePayload {
    #[validate(length(min = 1, max = 64))]
    pub user_profile_id: String,
}

/// `user.settings.update` payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSettingsPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(nested)]
    pub patch: SettingsPatch,
}
