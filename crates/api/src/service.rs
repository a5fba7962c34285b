//! The record-manager trait and the dispatching service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use user_records_core::{ServiceConfig, ServiceError, ServiceResult, StoreAdapter};

use crate::envelope::{RpcRequest, RpcResponse};
use crate::managers::{
    profile::ProfileManager, settings::SettingsManager, status::StatusManager,
    subscription::SubscriptionManager,
};

/// Context passed to manager handlers: configuration plus the store handle.
pub struct RecordContext<S: StoreAdapter> {
    pub config: Arc<ServiceConfig>,
    pub store: Arc<S>,
}

impl<S: StoreAdapter> RecordContext<S> {
    pub fn new(config: Arc<ServiceConfig>, store: Arc<S>) -> Self {
        Self { config, store }
    }
}

/// A record manager owns one entity type and the message patterns that
/// operate on it.
#[async_trait]
pub trait RecordManager<S: StoreAdapter>: Send + Sync {
    /// Manager name - should be unique.
    fn name(&self) -> &'static str;

    /// Patterns this manager handles.
    fn patterns(&self) -> &'static [&'static str];

    /// Handle a message - return `Some(data)` to answer, `None` to pass
    /// through to the next manager.
    async fn on_message(
        &self,
        req: &RpcRequest,
        ctx: &RecordContext<S>,
    ) -> ServiceResult<Option<Value>>;
}

/// The message-pattern service: routes each request to the owning manager
/// and wraps the outcome in the RPC envelope.
pub struct UserRecordService<S: StoreAdapter> {
    ctx: RecordContext<S>,
    managers: Vec<Box<dyn RecordManager<S>>>,
}

impl<S: StoreAdapter> UserRecordService<S> {
    pub fn new(config: ServiceConfig, store: Arc<S>) -> Self {
        let ctx = RecordContext::new(Arc::new(config), store);
        let managers: Vec<Box<dyn RecordManager<S>>> = vec![
            Box::new(ProfileManager::new()),
            Box::new(SettingsManager::new()),
            Box::new(SubscriptionManager::new()),
            Box::new(StatusManager::new()),
        ];
        Self { ctx, managers }
    }

    /// Every pattern the service answers to.
    pub fn patterns(&self) -> Vec<&'static str> {
        self.managers
            .iter()
            .flat_map(|m| m.patterns().iter().copied())
            .collect()
    }

    /// Route a request to its manager and envelope the result.
    pub async fn dispatch(&self, req: &RpcRequest) -> RpcResponse {
        tracing::debug!(pattern = %req.pattern, "dispatching message");

        for manager in &self.managers {
            match manager.on_message(req, &self.ctx).await {
                Ok(Some(data)) => return RpcResponse::success(data),
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(
                        pattern = %req.pattern,
                        manager = manager.name(),
                        error = %err,
                        "operation failed"
                    );
                    return RpcResponse::from_error(&err);
                }
            }
        }

        RpcResponse::from_error(&ServiceError::UnknownPattern(req.pattern.clone()))
    }
}
