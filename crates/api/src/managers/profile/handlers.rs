use user_records_core::{
    lifecycle, CreateProfile, Paginated, ServiceResult, StoreAdapter, UserProfile, UserSettings,
    UserStatus,
};

use crate::managers::optional;
use crate::service::RecordContext;

use super::types::{FindAllPayload, ProfileWithRelations, UpdateProfilePayload};

// ---------------------------------------------------------------------------
// Core functions -- transport-agnostic business logic
// ---------------------------------------------------------------------------

pub(crate) async fn create_core<S: StoreAdapter>(
    body: &CreateProfile,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserProfile> {
    tracing::info!(auth_user_id = %body.auth_user_id, "creating profile");
    lifecycle::create_or_restore(&*ctx.store, body).await
}

pub(crate) async fn find_by_id_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserProfile> {
    lifecycle::find_active(&*ctx.store, id).await
}

pub(crate) async fn find_by_auth_user_id_core<S: StoreAdapter>(
    auth_user_id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserProfile> {
    lifecycle::find_active_by_key(&*ctx.store, auth_user_id).await
}

pub(crate) async fn find_with_relations_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<ProfileWithRelations> {
    let profile: UserProfile = lifecycle::find_active(&*ctx.store, id).await?;

    let settings = optional(
        lifecycle::find_active_by_key::<UserSettings, _>(&*ctx.store, &profile.id).await,
    )?;
    let subscriptions = ctx.store.subscriptions_for_profile(&profile.id).await?;
    let status =
        optional(lifecycle::find_active_by_key::<UserStatus, _>(&*ctx.store, &profile.id).await)?;

    Ok(ProfileWithRelations {
        profile,
        settings,
        subscriptions,
        status,
    })
}

pub(crate) async fn update_core<S: StoreAdapter>(
    body: &UpdateProfilePayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserProfile> {
    tracing::info!(id = %body.id, "updating profile");
    lifecycle::update(&*ctx.store, &body.id, &body.patch, body.patch.version).await
}

pub(crate) async fn delete_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<()> {
    tracing::info!(id, "soft deleting profile");
    lifecycle::soft_delete::<UserProfile, _>(&*ctx.store, id).await
}

pub(crate) async fn find_all_core<S: StoreAdapter>(
    body: &FindAllPayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<Paginated<UserProfile>> {
    let page = body.page.unwrap_or(1).max(1);
    let limit = body
        .limit
        .unwrap_or(ctx.config.default_page_limit)
        .clamp(1, ctx.config.max_page_limit);
    let offset = u64::from(page - 1) * u64::from(limit);

    let (records, total) = ctx.store.list_profiles(offset, u64::from(limit)).await?;
    Ok(Paginated::new(records, total, page, limit))
}
