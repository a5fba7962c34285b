use super::*;
use crate::managers::test_helpers;
use serde_json::json;

fn request(pattern: &str, payload: serde_json::Value) -> RpcRequest {
    RpcRequest::new(pattern, payload)
}

#[tokio::test]
async fn create_applies_defaults() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = SettingsManager::new();

    let settings = manager
        .on_message(
            &request(
                patterns::SETTINGS_CREATE,
                json!({"userProfileId": profile.id}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(settings["language"], "en");
    assert_eq!(settings["theme"], "light");
    assert_eq!(settings["timezone"], "UTC");
    assert_eq!(settings["emailNotifications"], true);
    assert_eq!(settings["smsNotifications"], false);
    assert_eq!(settings["videoQuality"], "auto");
    assert_eq!(settings["maturityRating"], "PG-13");
    assert_eq!(settings["sessionTimeout"], 3600);
    assert_eq!(settings["version"], 1);
}

#[tokio::test]
async fn create_without_parent_rejected() {
    let ctx = test_helpers::create_test_context();
    let manager = SettingsManager::new();

    let err = manager
        .on_message(
            &request(
                patterns::SETTINGS_CREATE,
                json!({"userProfileId": "no-such-profile"}),
            ),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn duplicate_settings_rejected() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = SettingsManager::new();

    let create = request(
        patterns::SETTINGS_CREATE,
        json!({"userProfileId": profile.id}),
    );
    manager.on_message(&create, &ctx).await.unwrap();

    let err = manager.on_message(&create, &ctx).await.unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_RECORD");
}

#[tokio::test]
async fn reset_restores_defaults_and_bumps_version() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = SettingsManager::new();

    let created = manager
        .on_message(
            &request(
                patterns::SETTINGS_CREATE,
                json!({
                    "userProfileId": profile.id,
                    "theme": "dark",
                    "language": "fr",
                    "sessionTimeout": 120
                }),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created["theme"], "dark");

    let reset = manager
        .on_message(
            &request(patterns::SETTINGS_RESET, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reset["theme"], "light");
    assert_eq!(reset["language"], "en");
    assert_eq!(reset["sessionTimeout"], 3600);
    assert_eq!(reset["version"], 2);
}

#[tokio::test]
async fn update_honors_optimistic_lock() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = SettingsManager::new();

    let created = manager
        .on_message(
            &request(
                patterns::SETTINGS_CREATE,
                json!({"userProfileId": profile.id}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    let err = manager
        .on_message(
            &request(
                patterns::SETTINGS_UPDATE,
                json!({"id": created["id"], "patch": {"theme": "dark", "version": 5}}),
            ),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VERSION_CONFLICT");

    let updated = manager
        .on_message(
            &request(
                patterns::SETTINGS_UPDATE,
                json!({"id": created["id"], "patch": {"theme": "dark"}}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["theme"], "dark");
    assert_eq!(updated["version"], 2);
    // Untouched preferences keep their values.
    assert_eq!(updated["language"], "en");
}

#[tokio::test]
async fn restore_after_delete_keeps_identity() {
    let ctx = test_helpers::create_test_context();
    let profile = test_helpers::create_profile(&ctx, "u1").await;
    let manager = SettingsManager::new();

    let created = manager
        .on_message(
            &request(
                patterns::SETTINGS_CREATE,
                json!({"userProfileId": profile.id}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    manager
        .on_message(
            &request(patterns::SETTINGS_DELETE, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap();

    let restored = manager
        .on_message(
            &request(
                patterns::SETTINGS_CREATE,
                json!({"userProfileId": profile.id, "theme": "dark"}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restored["id"], created["id"]);
    assert_eq!(restored["theme"], "dark");
    assert_eq!(restored["version"], 3);
}
