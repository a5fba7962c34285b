use thiserror::Error;

use crate::record::EntityKind;

/// Service error types.
///
/// Each variant maps to a wire error code via [`ServiceError::code`] and to an
/// HTTP-equivalent status via [`ServiceError::status_code`]. Use
/// [`ServiceError::into_response`] to produce the standardized RPC error
/// envelope: `{ "status": "error", "code": "...", "message": "..." }`.
#[derive(Error, Debug)]
pub enum ServiceError {
    // --- 404 Not Found ---
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Profile not found: {0}")]
    ParentNotFound(String),

    // --- 409 Conflict ---
    #[error("{kind} already exists for {key}")]
    Duplicate { kind: EntityKind, key: String },

    #[error("{0} has been modified by another process. Please refresh and try again.")]
    VersionConflict(EntityKind),

    // --- 400 Bad Request ---
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown message pattern: {0}")]
    UnknownPattern(String),

    // --- 500 Internal Server Error ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Stable wire error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { kind, .. } => match kind {
                EntityKind::Profile => "PROFILE_NOT_FOUND",
                EntityKind::Settings => "SETTINGS_NOT_FOUND",
                EntityKind::Subscription => "SUBSCRIPTION_NOT_FOUND",
                EntityKind::Status => "STATUS_NOT_FOUND",
            },
            // A missing parent is reported with the profile's own code so
            // callers see the same shape as a direct profile lookup miss.
            Self::ParentNotFound(_) => "PROFILE_NOT_FOUND",
            Self::Duplicate { .. } => "DUPLICATE_RECORD",
            Self::VersionConflict(_) => "VERSION_CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnknownPattern(_) => "UNKNOWN_PATTERN",
            Self::Store(_) => "STORE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP-equivalent status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::ParentNotFound(_) => 404,
            Self::Duplicate { .. } | Self::VersionConflict(_) => 409,
            Self::Validation(_) | Self::UnknownPattern(_) => 400,
            Self::Store(_) | Self::Serialization(_) => 500,
        }
    }

    /// The message exposed on the wire.
    ///
    /// Internal errors (500) use a generic message to avoid leaking details.
    pub fn public_message(&self) -> String {
        match self.status_code() {
            500 => "Internal service error".to_string(),
            _ => self.to_string(),
        }
    }

    // --- Constructors ---

    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn parent_not_found(profile_id: impl Into<String>) -> Self {
        Self::ParentNotFound(profile_id.into())
    }

    pub fn duplicate(kind: EntityKind, key: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            key: key.into(),
        }
    }

    pub fn version_conflict(kind: EntityKind) -> Self {
        Self::VersionConflict(kind)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Storage-level error types, wrapped into [`ServiceError::Store`] when they
/// cross the store boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

#[cfg(feature = "sqlx-postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StoreError::Constraint(db_err.to_string())
                } else {
                    StoreError::Query(db_err.to_string())
                }
            }
            sqlx::Error::PoolClosed => StoreError::Connection("Pool closed".to_string()),
            sqlx::Error::PoolTimedOut => StoreError::Connection("Pool timed out".to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parse and validate a message payload, returning the typed value or a
/// [`ServiceError::Validation`] describing every failed field.
pub fn validate_payload<T>(payload: &serde_json::Value) -> ServiceResult<T>
where
    T: serde::de::DeserializeOwned + validator::Validate,
{
    // A missing payload is treated as an empty object so that patterns with
    // all-optional inputs can be invoked bare.
    let empty;
    let payload = if payload.is_null() {
        empty = serde_json::Value::Object(serde_json::Map::new());
        &empty
    } else {
        payload
    };
    let value: T = serde_json::from_value(payload.clone())
        .map_err(|e| ServiceError::validation(format!("Invalid payload: {}", e)))?;

    value.validate().map_err(|errors| {
        let details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| format!("{}: {}", field, m))
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        ServiceError::validation(details.join("; "))
    })?;

    Ok(value)
}
