//! Subscription manager: one-to-many billing child of a profile with its own
//! status state machine and expiration logic.

use async_trait::async_trait;
use serde_json::Value;

use user_records_core::{validate_payload, ServiceResult, StoreAdapter};

use crate::envelope::RpcRequest;
use crate::managers::{DeleteResponse, IdPayload};
use crate::patterns;
use crate::service::{RecordContext, RecordManager};

pub(super) mod handlers;
pub(super) mod types;


use types::{
    CheckExpirationResponse, CreateSubscriptionPayload, FindByProfilePayload, FindExpiringPayload,
    SuspendSubscriptionPayload, UpdateSubscriptionPayload,
};

pub struct SubscriptionManager;

impl SubscriptionManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: StoreAdapter> RecordManager<S> for SubscriptionManager {
    fn name(&self) -> &'static str {
        "subscription"
    }

    fn patterns(&self) -> &'static [&'static str] {
        patterns::SUBSCRIPTION
    }

    async fn on_message(
        &self,
        req: &RpcRequest,
        ctx: &RecordContext<S>,
    ) -> ServiceResult<Option<Value>> {
        match req.pattern.as_str() {
            patterns::SUBSCRIPTION_CREATE => {
                let body: CreateSubscriptionPayload = validate_payload(&req.payload)?;
                let subscription = handlers::create_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_FIND_BY_ID => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let subscription = handlers::find_by_id_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_FIND_ACTIVE_BY_USER_PROFILE_ID => {
                let body: FindByProfilePayload = validate_payload(&req.payload)?;
                let subscription =
                    handlers::find_active_by_profile_core(&body.user_profile_id, ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_FIND_ALL_BY_USER_PROFILE_ID => {
                let body: FindByProfilePayload = validate_payload(&req.payload)?;
                let subscriptions =
                    handlers::find_all_by_profile_core(&body.user_profile_id, ctx).await?;
                Ok(Some(serde_json::to_value(subscriptions)?))
            }
            patterns::SUBSCRIPTION_UPDATE => {
                let body: UpdateSubscriptionPayload = validate_payload(&req.payload)?;
                let subscription = handlers::update_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_DELETE => {
                let body: IdPayload = validate_payload(&req.payload)?;
                handlers::delete_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(DeleteResponse::deleted(
                    "Subscription",
                ))?))
            }
            patterns::SUBSCRIPTION_CANCEL => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let subscription = handlers::cancel_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_SUSPEND => {
                let body: SuspendSubscriptionPayload = validate_payload(&req.payload)?;
                let subscription =
                    handlers::suspend_core(&body.id, body.reason.as_deref(), ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_ACTIVATE => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let subscription = handlers::activate_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(subscription)?))
            }
            patterns::SUBSCRIPTION_CHECK_EXPIRATION => {
                let body: IdPayload = validate_payload(&req.payload)?;
                let is_expired = handlers::check_expiration_core(&body.id, ctx).await?;
                Ok(Some(serde_json::to_value(CheckExpirationResponse {
                    is_expired,
                })?))
            }
            patterns::SUBSCRIPTION_FIND_EXPIRING_SOON => {
                let body: FindExpiringPayload = validate_payload(&req.payload)?;
                let subscriptions = handlers::find_expiring_core(&body, ctx).await?;
                Ok(Some(serde_json::to_value(subscriptions)?))
            }
            _ => Ok(None),
        }
    }
}
