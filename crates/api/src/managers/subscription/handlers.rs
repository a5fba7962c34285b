use chrono::{Duration, Utc};
use serde_json::Value;

use user_records_core::{
    lifecycle, CreateSubscription, ServiceError, ServiceResult, StoreAdapter, Subscription,
    SubscriptionPatch, SubscriptionStatus,
};

use crate::managers::ensure_parent_profile;
use crate::service::RecordContext;

use super::types::{
    CreateSubscriptionPayload, FindExpiringPayload, SubscriptionPatchPayload,
    UpdateSubscriptionPayload,
};

/// Decode the wire-level metadata string. A malformed string is a business
/// rule violation, not a transport error.
fn parse_metadata(raw: Option<&str>) -> ServiceResult<Option<Value>> {
    match raw {
        None => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(|e| ServiceError::validation(format!("Invalid metadata JSON: {}", e))),
    }
}

impl CreateSubscriptionPayload {
    fn to_create(&self) -> ServiceResult<CreateSubscription> {
        Ok(CreateSubscription {
            user_profile_id: self.user_profile_id.clone(),
            plan_type: self.plan_type.clone(),
            status: self.status,
            billing_cycle: self.billing_cycle.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            renewal_date: self.renewal_date,
            trial_ends_at: self.trial_ends_at,
            is_auto_renew: self.is_auto_renew,
            is_trial: self.is_trial,
            max_devices: self.max_devices,
            max_profiles: self.max_profiles,
            can_download: self.can_download,
            video_quality: self.video_quality.clone(),
            ads_enabled: self.ads_enabled,
            external_subscription_id: self.external_subscription_id.clone(),
            payment_method: self.payment_method.clone(),
            metadata: parse_metadata(self.metadata.as_deref())?,
        })
    }
}

impl SubscriptionPatchPayload {
    fn to_patch(&self) -> ServiceResult<SubscriptionPatch> {
        Ok(SubscriptionPatch {
            plan_type: self.plan_type.clone(),
            status: self.status,
            billing_cycle: self.billing_cycle.clone(),
            end_date: self.end_date,
            renewal_date: self.renewal_date,
            canceled_at: self.canceled_at,
            suspended_at: self.suspended_at,
            trial_ends_at: self.trial_ends_at,
            is_auto_renew: self.is_auto_renew,
            is_trial: self.is_trial,
            max_devices: self.max_devices,
            max_profiles: self.max_profiles,
            can_download: self.can_download,
            video_quality: self.video_quality.clone(),
            ads_enabled: self.ads_enabled,
            external_subscription_id: self.external_subscription_id.clone(),
            payment_method: self.payment_method.clone(),
            metadata: parse_metadata(self.metadata.as_deref())?,
            version: self.version,
        })
    }
}

// ---------------------------------------------------------------------------
// Core functions -- transport-agnostic business logic
// ---------------------------------------------------------------------------

pub(crate) async fn create_core<S: StoreAdapter>(
    body: &CreateSubscriptionPayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<Subscription> {
    tracing::info!(user_profile_id = %body.user_profile_id, plan = %body.plan_type,
        "creating subscription");
    ensure_parent_profile(ctx, &body.user_profile_id).await?;
    // A profile may hold many subscriptions; no duplicate or restore check.
    lifecycle::create(&*ctx.store, &body.to_create()?).await
}

pub(crate) async fn find_by_id_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<Subscription> {
    lifecycle::find_active(&*ctx.store, id).await
}

pub(crate) async fn find_active_by_profile_core<S: StoreAdapter>(
    user_profile_id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<Option<Subscription>> {
    Ok(ctx.store.active_subscription(user_profile_id).await?)
}

pub(crate) async fn find_all_by_profile_core<S: StoreAdapter>(
    user_profile_id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<Vec<Subscription>> {
    Ok(ctx.store.subscriptions_for_profile(user_profile_id).await?)
}

pub(crate) async fn update_core<S: StoreAdapter>(
    body: &UpdateSubscriptionPayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<Subscription> {
    tracing::info!(id = %body.id, "updating subscription");
    let patch = body.patch.to_patch()?;
    lifecycle::update(&*ctx.store, &body.id, &patch, patch.version).await
}

pub(crate) async fn delete_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<()> {
    tracing::info!(id, "soft deleting subscription");
    lifecycle::soft_delete::<Subscription, _>(&*ctx.store, id).await
}

/// Unconditional transition to `canceled`. Re-canceling simply re-stamps
/// `canceled_at`; auto-renew is always switched off.
pub(crate) async fn cancel_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<Subscription> {
    tracing::info!(id, "canceling subscription");
    lifecycle::apply_transition(&*ctx.store, id, |sub: &mut Subscription| {
        sub.status = SubscriptionStatus::Canceled;
        sub.canceled_at = Some(Utc::now());
        sub.is_auto_renew = false;
    })
    .await
}

pub(crate) async fn suspend_core<S: StoreAdapter>(
    id: &str,
    reason: Option<&str>,
    ctx: &RecordContext<S>,
) -> ServiceResult<Subscription> {
    tracing::info!(id, "suspending subscription");
    let reason = reason.map(|r| r.to_string());
    lifecycle::apply_transition(&*ctx.store, id, move |sub: &mut Subscription| {
        sub.status = SubscriptionStatus::Suspended;
        sub.suspended_at = Some(Utc::now());
        if let Some(reason) = reason {
            sub.metadata = Some(serde_json::json!({ "suspendReason": reason }));
        }
    })
    .await
}

pub(crate) async fn activate_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<Subscription> {
    tracing::info!(id, "activating subscription");
    lifecycle::apply_transition(&*ctx.store, id, |sub: &mut Subscription| {
        sub.status = SubscriptionStatus::Active;
        sub.suspended_at = None;
    })
    .await
}

/// Pure read: no state mutation.
pub(crate) async fn check_expiration_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<bool> {
    let subscription: Subscription = lifecycle::find_active(&*ctx.store, id).await?;
    Ok(subscription.is_expired_at(Utc::now()))
}

pub(crate) async fn find_expiring_core<S: StoreAdapter>(
    body: &FindExpiringPayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<Vec<Subscription>> {
    let days = body.days.unwrap_or(ctx.config.expiring_window_days);
    let now = Utc::now();
    let subscriptions = ctx
        .store
        .subscriptions_expiring_between(now, now + Duration::days(days))
        .await?;
    Ok(subscriptions)
}
