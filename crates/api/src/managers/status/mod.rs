//! Status manager: one-to-one moderation child of a profile with a
//! suspend/ban/activate state machine and capability flags.

use async_trait::async_trait;
use serde_json::Value;

use user_records_core::{validate_payload, CreateStatus, ServiceResult, StoreAdapter};

use crate::envelope::RpcRequest;
use crate::managers::{DeleteResponse, IdPayload};
use crate::patterns;
use crate::service::{RecordContext, RecordManager};

pub(super) mod handlers;
pub(super) mod types;

#[cfg(test)]
mod tests;

use types::{BanStatusPayload, FindByProfilePayload, SuspendStatusPayload, UpdateStatusPayload};

pub struct StatusManager;

impl StatusManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatusManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: StoreAdapter> RecordManager<S> for StatusManager {
    fn name(&self) -> &'static str {
        "status"
    }

    fn patterns(&self) -> &'static [&'static str] {
        patterns::STATUS
    }

    async fn on_message(
        &self,
        req: &RpcRequest,
        ctx: &RecordContext<S>,
    ) -> ServiceResult<Option<Value>> {
        match req.pattern.as_str() {
            patterns::STATUS_CREATE => {
                let body: CreateStatus = validate_payload(&req.payload)?;
                let status = handlers::create_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_FIND_BY_ID => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let status = handlers::find_by_id_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_FIND_BY_USER_PROFILE_ID => {
                let body: FindByProfilePayload = validate_payload(&req.payload)?;
                let status = handlers::find_by_profile_core(&body.user_profile_id, ctx).await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_UPDATE => {
                let body: UpdateStatusPayload = validate_payload(&req.payload)?;
                let status = handlers::update_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_DELETE => {
                let body: IdPayload = validate_payload(&req.payload)?;
                handlers::delete_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(DeleteResponse::deleted(
                    "Status",
                ))?))
            }
            patterns::STATUS_SUSPEND => {
                let body: SuspendStatusPayload = validate_payload(&req.payload)?;
                let status = handlers::suspend_core(
                    &body.id,
                    &body.reason,
                    &body.actioned_by,
                    body.expires_at,
                    ctx,
                )
                .await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_BAN => {
                let body: BanStatusPayload = validate_payload(&req.payload)?;
                let status =
                    handlers::ban_core(&body.id, &body.reason, &body.actioned_by, ctx).await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_ACTIVATE => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let status = handlers::activate_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(status)?))
            }
            patterns::STATUS_FIND_ALL_SUSPENDED => {
                let statuses = handlers::find_all_suspended_core(ctx).await?;
                Ok(Some(serde_json::to_value(statuses)?))
            }
            patterns::STATUS_FIND_ALL_BANNED => {
                let statuses = handlers::find_all_banned_core(ctx).await?;
                Ok(Some(serde_json::to_value(statuses)?))
            }
            _ => Ok(None),
        }
    }
}
