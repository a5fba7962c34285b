use super::*;
use crate::managers::test_helpers;
use serde_json::json;

fn request(pattern: &str, payload: serde_json::Value) -> RpcRequest {
    RpcRequest::new(pattern, payload)
}

async fn create_status(
    ctx: &crate::service::RecordContext<user_records_core::MemoryStoreAdapter>,
    manager: &StatusManager,
    user_profile_id: &str,
) -> serde_json::Value {
    manager
        .on_message(
            &request(
                patterns::STATUS_CREATE,
                json!({"userProfileId": user_profile_id}),
            ),
            ctx,
        )
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn create_applies_defaults() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = StatusManager::new();

    let status = create_status(&ctx, &manager, &profile.id).await;

    assert_eq!(status["status"], "active");
    assert_eq!(status["canLogin"], true);
    assert_eq!(status["canStream"], true);
    assert_eq!(status["canComment"], true);
    assert_eq!(status["canUpload"], false);
    assert_eq!(status["canMessage"], true);
    assert_eq!(status["canPurchase"], true);
    assert_eq!(status["isVerified"], false);
    assert_eq!(status["version"], 1);
}

#[tokio::test]
async fn create_without_parent_rejected() {
    let ctx = test_helpers::create_test_context();
    let manager = StatusManager::new();

    let err = manager
        .on_message(
            &request(patterns::STATUS_CREATE, json!({"userProfileId": "nobody"})),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn suspend_revokes_login_and_streaming_only() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = StatusManager::new();

    let status = create_status(&ctx, &manager, &profile.id).await;

    let suspended = manager
        .on_message(
            &request(
                patterns::STATUS_SUSPEND,
                json!({
                    "id": status["id"],
                    "reason": "abuse reports",
                    "actionedBy": "moderator-7"
                }),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(suspended["status"], "suspended");
    assert_eq!(suspended["reason"], "abuse reports");
    assert_eq!(suspended["actionedBy"], "moderator-7");
    assert!(!suspended["actionedAt"].is_null());
    assert_eq!(suspended["canLogin"], false);
    assert_eq!(suspended["canStream"], false);
    // The other capability flags are untouched by a suspension.
    assert_eq!(suspended["canComment"], true);
    assert_eq!(suspended["canMessage"], true);
    assert_eq!(suspended["canPurchase"], true);
    assert_eq!(suspended["version"], 2);
}

#[tokio::test]
async fn ban_revokes_all_interactive_capabilities() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = StatusManager::new();

    let status = create_status(&ctx, &manager, &profile.id).await;

    let banned = manager
        .on_message(
            &request(
                patterns::STATUS_BAN,
                json!({
                    "id": status["id"],
                    "reason": "fraud",
                    "actionedBy": "admin-1"
                }),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(banned["status"], "banned");
    for flag in [
        "canLogin",
        "canStream",
        "canComment",
        "canMessage",
        "canPurchase",
    ] {
        assert_eq!(banned[flag], false, "{} should be revoked", flag);
    }
}

#[tokio::test]
async fn activate_restores_capabilities_and_clears_moderation_fields() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = StatusManager::new();

    let status = create_status(&ctx, &manager, &profile.id).await;

    // Mark the user verified before the ban to prove activation leaves the
    // standing flags alone.
    manager
        .on_message(
            &request(
                patterns::STATUS_UPDATE,
                json!({"id": status["id"], "patch": {"isVerified": true}}),
            ),
            &ctx,
        )
        .await
        .unwrap();

    manager
        .on_message(
            &request(
                patterns::STATUS_BAN,
                json!({"id": status["id"], "reason": "fraud", "actionedBy": "admin-1"}),
            ),
            &ctx,
        )
        .await
        .unwrap();

    let activated = manager
        .on_message(
            &request(patterns::STATUS_ACTIVATE, json!({"id": status["id"]})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(activated["status"], "active");
    assert_eq!(activated["reason"], serde_json::Value::Null);
    assert_eq!(activated["reasonDetail"], serde_json::Value::Null);
    assert_eq!(activated["expiresAt"], serde_json::Value::Null);
    for flag in [
        "canLogin",
        "canStream",
        "canComment",
        "canMessage",
        "canPurchase",
    ] {
        assert_eq!(activated[flag], true, "{} should be restored", flag);
    }
    assert_eq!(activated["isVerified"], true);
    // create, update, ban, activate.
    assert_eq!(activated["version"], 4);
}

#[tokio::test]
async fn scans_filter_by_moderation_state() {
    let ctx = test_helpers::create_test_context();
    let manager = StatusManager::new();

    let p1 = test_helpers::create_profile(&ctx, "u1").await;
    let p2 = test_helpers::create_profile(&ctx, "u2").await;
    let p3 = test_helpers::create_profile(&ctx, "u3").await;

    let s1 = create_status(&ctx, &manager, &p1.id).await;
    let s2 = create_status(&ctx, &manager, &p2.id).await;
    create_status(&ctx, &manager, &p3.id).await;

    manager
        .on_message(
            &request(
                patterns::STATUS_SUSPEND,
                json!({"id": s1["id"], "reason": "spam", "actionedBy": "mod"}),
            ),
            &ctx,
        )
        .await
        .unwrap();
    manager
        .on_message(
            &request(
                patterns::STATUS_BAN,
                json!({"id": s2["id"], "reason": "fraud", "actionedBy": "mod"}),
            ),
            &ctx,
        )
        .await
        .unwrap();

    let suspended = manager
        .on_message(&request(patterns::STATUS_FIND_ALL_SUSPENDED, json!({})), &ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(suspended.as_array().unwrap().len(), 1);
    assert_eq!(suspended[0]["id"], s1["id"]);

    let banned = manager
        .on_message(&request(patterns::STATUS_FIND_ALL_BANNED, json!({})), &ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(banned.as_array().unwrap().len(), 1);
    assert_eq!(banned[0]["id"], s2["id"]);
}

#[tokio::test]
async fn duplicate_status_rejected_and_restore_supported() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = StatusManager::new();

    let status = create_status(&ctx, &manager, &profile.id).await;

    let err = manager
        .on_message(
            &request(patterns::STATUS_CREATE, json!({"userProfileId": profile.id})),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_RECORD");

    manager
        .on_message(
            &request(patterns::STATUS_DELETE, json!({"id": status["id"]})),
            &ctx,
        )
        .await
        .unwrap();

    let restored = create_status(&ctx, &manager, &profile.id).await;
    assert_eq!(restored["id"], status["id"]);
    assert_eq!(restored["version"], 3);
}
