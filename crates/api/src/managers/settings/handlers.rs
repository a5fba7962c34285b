use user_records_core::{
    lifecycle, CreateSettings, ServiceResult, StoreAdapter, UserSettings,
};

use crate::managers::ensure_parent_profile;
use crate::service::RecordContext;

use super::types::UpdateSettingsPayload;

// ---------------------------------------------------------------------------
// Core functions -- transport-agnostic business logic
// ---------------------------------------------------------------------------

pub(crate) async fn create_core<S: StoreAdapter>(
    body: &CreateSettings,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserSettings> {
    tracing::info!(user_profile_id = %body.user_profile_id, "creating settings");
    ensure_parent_profile(ctx, &body.user_profile_id).await?;
    lifecycle::create_or_restore(&*ctx.store, body).await
}

pub(crate) async fn find_by_id_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserSettings> {
    lifecycle::find_active(&*ctx.store, id).await
}

pub(crate) async fn find_by_profile_core<S: StoreAdapter>(
    user_profile_id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserSettings> {
    lifecycle::find_active_by_key(&*ctx.store, user_profile_id).await
}

pub(crate) async fn update_core<S: StoreAdapter>(
    body: &UpdateSettingsPayload,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserSettings> {
    tracing::info!(id = %body.id, "updating settings");
    lifecycle::update(&*ctx.store, &body.id, &body.patch, body.patch.version).await
}

pub(crate) async fn delete_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<()> {
    tracing::info!(id, "soft deleting settings");
    lifecycle::soft_delete::<UserSettings, _>(&*ctx.store, id).await
}

/// Overwrite every preference with the fixed default set. A self-service
/// action: last write wins, no version gate.
pub(crate) async fn reset_core<S: StoreAdapter>(
    id: &str,
    ctx: &RecordContext<S>,
) -> ServiceResult<UserSettings> {
    tracing::info!(id, "resetting settings to defaults");
    lifecycle::apply_transition(&*ctx.store, id, |settings: &mut UserSettings| {
        settings.reset_to_defaults();
    })
    .await
}
