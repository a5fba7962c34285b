//! Settings manager: one-to-one preference child of a profile.

use async_trait::async_trait;
use serde_json::Value;

use user_records_core::{validate_payload, CreateSettings, ServiceResult, StoreAdapter};

use crate::envelope::RpcRequest;
use crate::managers::{DeleteResponse, IdPayload};
use crate::patterns;
use crate::service::{RecordContext, RecordManager};

pub(super) mod handlers;
pub(super) mod types;

#[cfg(test)]
mod tests;

use types::{FindByProfilePayload, UpdateSettingsPayload};

pub struct SettingsManager;

impl SettingsManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: StoreAdapter> RecordManager<S> for SettingsManager {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn patterns(&self) -> &'static [&'static str] {
        patterns::SETTINGS
    }

    async fn on_message(
        &self,
        req: &RpcRequest,
        ctx: &RecordContext<S>,
    ) -> ServiceResult<Option<Value>> {
        match req.pattern.as_str() {
            patterns::SETTINGS_CREATE => {
                let body: CreateSettings = validate_payload(&req.payload)?;
                let settings = handlers::create_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(settings)?))
            }
            patterns::SETTINGS_FIND_BY_ID => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let settings = handlers::find_by_id_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(settings)?))
            }
            patterns::SETTINGS_FIND_BY_USER_PROFILE_ID => {
                let body: FindByProfilePayload = validate_payload(&req.payload)?;
                let settings = handlers::find_by_profile_core(&body.user_profile_id, ctx).await?;
                Ok(Some(serde_json::to_value(settings)?))
            }
            patterns::SETTINGS_UPDATE => {
                let body: UpdateSettingsPayload = validate_payload(&req.payload)?;
                let settings = handlers::update_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(settings)?))
            }
            patterns::SETTINGS_DELETE => {
                let body: IdPayload = validate_payload(&req.payload)?;
                handlers::delete_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(DeleteResponse::deleted(
                    "Settings",
                ))?))
            }
            patterns::SETTINGS_RESET => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let settings = handlers::reset_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(settings)?))
            }
            _ => Ok(None),
        }
    }
}
