//! # User Records API
//!
//! The message-pattern surface of the user-records service. Requests arrive
//! as `{pattern, payload}` pairs and are routed to the record manager owning
//! the pattern; responses are wrapped in the standard success/error envelope.
//!
//! The transport in front of this crate is not this crate's concern: any
//! NATS/TCP/HTTP listener that can produce an [`RpcRequest`] can drive
//! [`UserRecordService::dispatch`].

pub mod envelope;
pub mod managers;
pub mod patterns;
pub mod service;

pub use envelope::{RpcRequest, RpcResponse};
pub use managers::{
    profile::ProfileManager, settings::SettingsManager, status::StatusManager,
    subscription::SubscriptionManager,
};
pub use service::{RecordContext, RecordManager, UserRecordService};
