use chrono::{DateTime, Utc};

use user_records_core::{
    lifecycle, AccountStatus, CreateStatus, ServiceResult, StoreAdapter, UserStatus,
};

use crate::managers::ensure_parent_profile;
use crate::service::RecordContext;

use super::types::UpdateStatusPayload;

// ---------------------------------------------------------------------------
// Core functions -- transport-agnostic business logic
// ---------------------------------------------------------------------------

pub(crate) async fn create_core<S: StoreAdapter>(
    body: &CreateStatus,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    tracing::info!(user_profile_id = %body.user_profile_id, "creating status");
    ensure_parent_profile(ctx, &body.user_profile_id).await?;
    lifecycle::create_or_restore(&*ctx.store, body).await
}

pub(crate) async fn find_by_id_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    lifecycle::find_active(&*ctx.store, id).await
}

pub(crate) async fn find_by_profile_core<S: StoreAdapter>(
    user_profile_id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    lifecycle::find_active_by_key(&*ctx.store, user_profile_id).await
}

pub(crate) async fn update_core<S: StoreAdapter>(
    body: &UpdateStatusPayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    tracing::info!(id = %body.id, "updating status");
    lifecycle::update(&*ctx.store, &body.id, &body.patch, body.patch.version).await
}

pub(crate) async fn delete_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<()> {
    tracing::info!(id, "soft deleting status");
    lifecycle::soft_delete::<UserStatus, _>(&*ctx.store, id).await
}

/// Suspend the account: login and streaming are revoked, other capability
/// flags are left alone.
pub(crate) async fn suspend_core<S: StoreAdapter>(
    id: &str,
    reason: &str,
    actioned_by: &str,
    expires_at: Option<DateTime<Utc>>,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    tracing::info!(id, actioned_by, "suspending user");
    let reason = reason.to_string();
    let actioned_by = actioned_by.to_string();
    lifecycle::apply_transition(&*ctx.store, id, move |status: &mut UserStatus| {
        status.status = AccountStatus::Suspended;
        status.reason = Some(reason);
        status.actioned_by = Some(actioned_by);
        status.actioned_at = Some(Utc::now());
        status.expires_at = expires_at;
        status.can_login = false;
        status.can_stream = false;
    })
    .await
}

/// Ban the account: every interactive capability is revoked.
pub(crate) async fn ban_core<S: StoreAdapter>(
    id: &str,
    reason: &str,
    actioned_by: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    tracing::info!(id, actioned_by, "banning user");
    let reason = reason.to_string();
    let actioned_by = actioned_by.to_string();
    lifecycle::apply_transition(&*ctx.store, id, move |status: &mut UserStatus| {
        status.status = AccountStatus::Banned;
        status.reason = Some(reason);
        status.actioned_by = Some(actioned_by);
        status.actioned_at = Some(Utc::now());
        status.can_login = false;
        status.can_stream = false;
        status.can_comment = false;
        status.can_message = false;
        status.can_purchase = false;
    })
    .await
}

/// Reinstate the account. The standing flags (`is_verified`, `is_moderator`,
/// `is_content_creator`, `is_premium_supporter`) are independent of the
/// moderation transitions and stay as they are.
pub(crate) async fn activate_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserStatus> {
    tracing::info!(id, "activating user");
    lifecycle::apply_transition(&*ctx.store, id, |status: &mut UserStatus| {
        status.status = AccountStatus::Active;
        status.reason = None;
        status.reason_detail = None;
        status.expires_at = None;
        status.can_login = true;
        status.can_stream = true;
        status.can_comment = true;
        status.can_message = true;
        status.can_purchase = true;
    })
    .await
}

pub(crate) async fn find_all_suspended_core<S: StoreAdapter>(
    ctx: &RecordContext<S>,
) -> ServiceResult<Vec<UserStatus>> {
    Ok(ctx.store.statuses_in(AccountStatus::Suspended).await?)
}

pub(crate) async fn find_all_banned_core<S: StoreAdapter>(
    ctx: &RecordContext<S>,
) -> ServiceResult<Vec<UserStatus>> {
    Ok(ctx.store.statuses_in(AccountStatus::Banned).await?)
}
