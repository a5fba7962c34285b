//! Request and response envelopes for the message-pattern surface.
//!
//! The transport in front of this crate (NATS, TCP, in-process tests) only
//! needs to produce an [`RpcRequest`] and forward the [`RpcResponse`] back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use user_records_core::ServiceError;

/// An inbound message: a pattern string plus its JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub pattern: String,
    #[serde(default)]
    pub payload: Value,
}

impl RpcRequest {
    pub fn new(pattern: impl Into<String>, payload: Value) -> Self {
        Self {
            pattern: pattern.into(),
            payload,
        }
    }
}

/// Standard RPC response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RpcResponse {
    Success {
        data: Value,
        timestamp: DateTime<Utc>,
    },
    Error {
        code: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl RpcResponse {
    pub fn success(data: Value) -> Self {
        Self::Success {
            data,
            timestamp: Utc::now(),
        }
    }

    pub fn from_error(err: &ServiceError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.public_message(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The `data` value of a success response.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    /// The `code` of an error response.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { code, .. } => Some(code),
        }
    }
}
