//! Profile manager: owns the aggregate root the other entities reference.

use async_trait::async_trait;
use serde_json::Value;

use user_records_core::{validate_payload, CreateProfile, ServiceResult, StoreAdapter};

use crate::envelope::RpcRequest;
use crate::managers::{DeleteResponse, IdPayload};
use crate::patterns;
use crate::service::{RecordContext, RecordManager};

pub(super) mod handlers;
pub(super) mod types;

#[cfg(test)]
mod tests;

pub use types::ProfileWithRelations;

use types::{FindAllPayload, FindByAuthUserIdPayload, UpdateProfilePayload};

pub struct ProfileManager;

impl ProfileManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProfileManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: StoreAdapter> RecordManager<S> for ProfileManager {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn patterns(&self) -> &'static [&'static str] {
        patterns::PROFILE
    }

    async fn on_message(
        &self,
        req: &RpcRequest,
        ctx: &RecordContext<S>,
    ) -> ServiceResult<Option<Value>> {
        match req.pattern.as_str() {
            patterns::PROFILE_CREATE => {
                let body: CreateProfile = validate_payload(&req.payload)?;
                let profile = handlers::create_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(profile)?))
            }
            patterns::PROFILE_FIND_BY_ID => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let profile = handlers::find_by_id_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(profile)?))
            }
            patterns::PROFILE_FIND_BY_AUTH_USER_ID => {
                let body: FindByAuthUserIdPayload = validate_payload(&req.payload)?;
                let profile = handlers::find_by_auth_user_id_core(&body.auth_user_id, ctx).await?;
                Ok(Some(serde_json::to_value(profile)?))
            }
            patterns::PROFILE_FIND_BY_ID_WITH_RELATIONS => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let profile = handlers::find_with_relations_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(profile)?))
            }
            patterns::PROFILE_UPDATE => {
                let body: UpdateProfilePayload = validate_payload(&req.payload)?;
                let profile = handlers::update_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(profile)?))
            }
            patterns::PROFILE_DELETE => {
                let body: IdPayload = validate_payload(&req.payload)?;
                handlers::delete_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(DeleteResponse::deleted(
                    "Profile",
                ))?))
            }
            patterns::PROFILE_FIND_ALL => {
                let body: FindAllPayload = validate_payload(&req.payload)?;
                let page = handlers::find_all_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(page)?))
            }
            _ => Ok(None),
        }
    }
}
