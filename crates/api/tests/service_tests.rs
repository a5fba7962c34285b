//! End-to-end tests driving the dispatcher through the message patterns,
//! the way a transport listener would.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};

use user_records_api::{patterns, RpcRequest, RpcResponse, UserRecordService};
use user_records_core::{MemoryStoreAdapter, ServiceConfig};

fn service() -> UserRecordService<MemoryStoreAdapter> {
    UserRecordService::new(ServiceConfig::default(), Arc::new(MemoryStoreAdapter::new()))
}

async fn send(
    service: &UserRecordService<MemoryStoreAdapter>,
    pattern: &str,
    payload: Value,
) -> RpcResponse {
    service.dispatch(&RpcRequest::new(pattern, payload)).await
}

async fn send_ok(
    service: &UserRecordService<MemoryStoreAdapter>,
    pattern: &str,
    payload: Value,
) -> Value {
    let response = send(service, pattern, payload).await;
    match response {
        RpcResponse::Success { data, .. } => data,
        RpcResponse::Error { code, message, .. } => {
            panic!("{} failed: {} ({})", pattern, message, code)
        }
    }
}

#[tokio::test]
async fn unknown_pattern_is_reported() {
    let service = service();
    let response = send(&service, "user.profile.frobnicate", json!({})).await;
    assert_eq!(response.error_code(), Some("UNKNOWN_PATTERN"));
}

#[tokio::test]
async fn error_envelope_carries_code_and_message() {
    let service = service();
    let response = send(&service, patterns::PROFILE_FIND_BY_ID, json!({"id": "missing"})).await;

    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded["status"], "error");
    assert_eq!(encoded["code"], "PROFILE_NOT_FOUND");
    assert!(encoded["message"].as_str().unwrap().contains("missing"));
    assert!(encoded.get("timestamp").is_some());
}

#[tokio::test]
async fn success_envelope_wraps_data() {
    let service = service();
    let response = send(
        &service,
        patterns::PROFILE_CREATE,
        json!({"authUserId": "u1"}),
    )
    .await;

    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded["status"], "success");
    assert_eq!(encoded["data"]["authUserId"], "u1");
    assert!(encoded.get("timestamp").is_some());
}

#[tokio::test]
async fn profile_settings_reset_flow() {
    let service = service();

    let profile = send_ok(
        &service,
        patterns::PROFILE_CREATE,
        json!({"authUserId": "u1"}),
    )
    .await;
    assert_eq!(profile["version"], 1);

    let settings = send_ok(
        &service,
        patterns::SETTINGS_CREATE,
        json!({"userProfileId": profile["id"], "theme": "dark"}),
    )
    .await;
    assert_eq!(settings["version"], 1);
    assert_eq!(settings["theme"], "dark");

    let reset = send_ok(
        &service,
        patterns::SETTINGS_RESET,
        json!({"id": settings["id"]}),
    )
    .await;

    // The full default table, version 2 after create then reset.
    assert_eq!(reset["version"], 2);
    assert_eq!(reset["language"], "en");
    assert_eq!(reset["theme"], "light");
    assert_eq!(reset["timezone"], "UTC");
    assert_eq!(reset["emailNotifications"], true);
    assert_eq!(reset["pushNotifications"], true);
    assert_eq!(reset["smsNotifications"], false);
    assert_eq!(reset["marketingEmails"], false);
    assert_eq!(reset["autoplay"], true);
    assert_eq!(reset["videoQuality"], "auto");
    assert_eq!(reset["subtitlesEnabled"], false);
    assert_eq!(reset["subtitlesLanguage"], "en");
    assert_eq!(reset["maturityRating"], "PG-13");
    assert_eq!(reset["dataSaverMode"], false);
    assert_eq!(reset["twoFactorEnabled"], false);
    assert_eq!(reset["sessionTimeout"], 3600);
    assert_eq!(reset["privacyShowProfile"], true);
    assert_eq!(reset["privacyShowActivity"], false);
    assert_eq!(reset["privacyAllowMessages"], true);
}

#[tokio::test]
async fn subscription_expiring_soon_flow() {
    let service = service();

    let profile = send_ok(
        &service,
        patterns::PROFILE_CREATE,
        json!({"authUserId": "u1"}),
    )
    .await;

    let subscription = send_ok(
        &service,
        patterns::SUBSCRIPTION_CREATE,
        json!({
            "userProfileId": profile["id"],
            "planType": "monthly",
            "status": "active",
            "endDate": Utc::now() + Duration::days(1)
        }),
    )
    .await;

    let within = send_ok(
        &service,
        patterns::SUBSCRIPTION_FIND_EXPIRING_SOON,
        json!({"days": 2}),
    )
    .await;
    assert_eq!(within.as_array().unwrap().len(), 1);
    assert_eq!(within[0]["id"], subscription["id"]);

    let outside = send_ok(
        &service,
        patterns::SUBSCRIPTION_FIND_EXPIRING_SOON,
        json!({"days": 0}),
    )
    .await;
    assert_eq!(outside.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn full_aggregate_lifecycle() {
    let service = service();

    let profile = send_ok(
        &service,
        patterns::PROFILE_CREATE,
        json!({"authUserId": "u1", "displayName": "Ada"}),
    )
    .await;
    let profile_id = profile["id"].clone();

    send_ok(
        &service,
        patterns::SETTINGS_CREATE,
        json!({"userProfileId": profile_id}),
    )
    .await;
    send_ok(
        &service,
        patterns::SUBSCRIPTION_CREATE,
        json!({"userProfileId": profile_id, "planType": "premium", "status": "active"}),
    )
    .await;
    send_ok(
        &service,
        patterns::STATUS_CREATE,
        json!({"userProfileId": profile_id}),
    )
    .await;

    let full = send_ok(
        &service,
        patterns::PROFILE_FIND_BY_ID_WITH_RELATIONS,
        json!({"id": profile_id}),
    )
    .await;
    assert_eq!(full["displayName"], "Ada");
    assert!(full["settings"].is_object());
    assert_eq!(full["subscriptions"].as_array().unwrap().len(), 1);
    assert!(full["status"].is_object());

    // Deleting the profile does not cascade to the children.
    send_ok(&service, patterns::PROFILE_DELETE, json!({"id": profile_id})).await;
    let orphaned = send_ok(
        &service,
        patterns::SETTINGS_FIND_BY_USER_PROFILE_ID,
        json!({"userProfileId": profile_id}),
    )
    .await;
    assert_eq!(orphaned["isDeleted"], false);
}

#[tokio::test]
async fn version_conflict_round_trip() {
    let service = service();

    let profile = send_ok(
        &service,
        patterns::PROFILE_CREATE,
        json!({"authUserId": "u1"}),
    )
    .await;

    // First writer wins.
    let updated = send_ok(
        &service,
        patterns::PROFILE_UPDATE,
        json!({"id": profile["id"], "patch": {"bio": "first", "version": 1}}),
    )
    .await;
    assert_eq!(updated["version"], 2);

    // Second writer, still holding version 1, is rejected.
    let response = send(
        &service,
        patterns::PROFILE_UPDATE,
        json!({"id": profile["id"], "patch": {"bio": "second", "version": 1}}),
    )
    .await;
    assert_eq!(response.error_code(), Some("VERSION_CONFLICT"));

    // A re-fetch gives the fresh version and the retry succeeds.
    let current = send_ok(
        &service,
        patterns::PROFILE_FIND_BY_ID,
        json!({"id": profile["id"]}),
    )
    .await;
    let retried = send_ok(
        &service,
        patterns::PROFILE_UPDATE,
        json!({"id": profile["id"], "patch": {"bio": "second", "version": current["version"]}}),
    )
    .await;
    assert_eq!(retried["version"], 3);
    assert_eq!(retried["bio"], "second");
}

#[tokio::test]
async fn moderation_flow_over_the_wire() {
    let service = service();

    let profile = send_ok(
        &service,
        patterns::PROFILE_CREATE,
        json!({"authUserId": "u1"}),
    )
    .await;
    let status = send_ok(
        &service,
        patterns::STATUS_CREATE,
        json!({"userProfileId": profile["id"]}),
    )
    .await;

    let banned = send_ok(
        &service,
        patterns::STATUS_BAN,
        json!({"id": status["id"], "reason": "tos violation", "actionedBy": "admin"}),
    )
    .await;
    assert_eq!(banned["status"], "banned");
    assert_eq!(banned["canLogin"], false);

    let all_banned = send_ok(&service, patterns::STATUS_FIND_ALL_BANNED, json!({})).await;
    assert_eq!(all_banned.as_array().unwrap().len(), 1);

    let reinstated = send_ok(
        &service,
        patterns::STATUS_ACTIVATE,
        json!({"id": status["id"]}),
    )
    .await;
    assert_eq!(reinstated["status"], "active");
    assert_eq!(reinstated["canLogin"], true);

    let all_banned = send_ok(&service, patterns::STATUS_FIND_ALL_BANNED, json!({})).await;
    assert_eq!(all_banned.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn validation_failure_surfaces_as_error_envelope() {
    let service = service();

    // authUserId is required.
    let response = send(&service, patterns::PROFILE_CREATE, json!({})).await;
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}
