//! One manager module per entity type. All four share the lifecycle
//! protocol from `user-records-core` and specialize it with their own
//! business rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

use user_records_core::{lifecycle, ServiceError, ServiceResult, StoreAdapter, UserProfile};

use crate::service::RecordContext;

pub mod profile;
pub mod settings;
pub mod status;
pub mod subscription;

/// Payload addressing a record by id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IdPayload {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
}

/// Response for delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(what: &str) -> Self {
        Self {
            success: true,
            message: format!("{} deleted successfully", what),
        }
    }
}

/// Verify the owning profile exists and is not soft-deleted before creating
/// a child record.
pub(crate) async fn ensure_parent_profile<S: StoreAdapter>(
    ctx: &RecordContext<S>,
    user_profile_id: &str,
) -> ServiceResult<()> {
    match lifecycle::find_active::<UserProfile, _>(&*ctx.store, user_profile_id).await {
        Ok(_) => Ok(()),
        Err(ServiceError::NotFound { .. }) => {
            Err(ServiceError::parent_not_found(user_profile_id))
        }
        Err(e) => Err(e),
    }
}

/// Collapse a `NotFound` into `None`, keeping other errors.
pub(crate) fn optional<T>(result: ServiceResult<T>) -> ServiceResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ServiceError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::sync::Arc;

    use user_records_core::{
        lifecycle, CreateProfile, MemoryStoreAdapter, ServiceConfig, UserProfile,
    };

    use crate::service::RecordContext;

    pub fn create_test_context() -> RecordContext<MemoryStoreAdapter> {
        RecordContext::new(
            Arc::new(ServiceConfig::default()),
            Arc::new(MemoryStoreAdapter::new()),
        )
    }

    pub async fn create_profile(
        ctx: &RecordContext<MemoryStoreAdapter>,
        auth_user_id: &str,
    ) -> UserProfile {
        let create = CreateProfile {
            auth_user_id: auth_user_id.to_string(),
            display_name: Some("Test User".to_string()),
            first_name: None,
            last_name: None,
            avatar: None,
            bio: None,
            country: None,
            date_of_birth: None,
            phone: None,
        };
        lifecycle::create_or_restore(&*ctx.store, &create)
            .await
            .unwrap()
    }
}
