use super::*;
use crate::managers::test_helpers;
use serde_json::json;

fn request(pattern: &str, payload: serde_json::Value) -> RpcRequest {
    RpcRequest::new(pattern, payload)
}

#[tokio::test]
async fn create_and_find_by_id() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    let created = manager
        .on_message(
            &request(
                patterns::PROFILE_CREATE,
                json!({"authUserId": "u1", "displayName": "Ada"}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created["version"], 1);
    assert_eq!(created["displayName"], "Ada");

    let found = manager
        .on_message(
            &request(patterns::PROFILE_FIND_BY_ID, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found["id"], created["id"]);
}

#[tokio::test]
async fn duplicate_create_rejected() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    let create = request(patterns::PROFILE_CREATE, json!({"authUserId": "u1"}));
    manager.on_message(&create, &ctx).await.unwrap();

    let err = manager.on_message(&create, &ctx).await.unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_RECORD");
}

#[tokio::test]
async fn recreate_after_delete_restores_same_record() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    let created = manager
        .on_message(
            &request(patterns::PROFILE_CREATE, json!({"authUserId": "u1"})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    manager
        .on_message(
            &request(patterns::PROFILE_DELETE, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap();

    let restored = manager
        .on_message(
            &request(
                patterns::PROFILE_CREATE,
                json!({"authUserId": "u1", "displayName": "Back again"}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(restored["id"], created["id"]);
    assert_eq!(restored["isDeleted"], false);
    assert_eq!(restored["version"], 3);
    assert_eq!(restored["displayName"], "Back again");
}

#[tokio::test]
async fn update_with_stale_version_conflicts() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    let created = manager
        .on_message(
            &request(patterns::PROFILE_CREATE, json!({"authUserId": "u1"})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    let err = manager
        .on_message(
            &request(
                patterns::PROFILE_UPDATE,
                json!({"id": created["id"], "patch": {"bio": "x", "version": 9}}),
            ),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VERSION_CONFLICT");

    // Matching version succeeds and bumps by one.
    let updated = manager
        .on_message(
            &request(
                patterns::PROFILE_UPDATE,
                json!({"id": created["id"], "patch": {"bio": "x", "version": 1}}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["version"], 2);
    assert_eq!(updated["bio"], "x");
}

#[tokio::test]
async fn deleted_profile_not_found() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    let created = manager
        .on_message(
            &request(patterns::PROFILE_CREATE, json!({"authUserId": "u1"})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();

    manager
        .on_message(
            &request(patterns::PROFILE_DELETE, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap();

    let err = manager
        .on_message(
            &request(patterns::PROFILE_FIND_BY_ID, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PROFILE_NOT_FOUND");

    // Second delete also reports the record gone.
    let err = manager
        .on_message(
            &request(patterns::PROFILE_DELETE, json!({"id": created["id"]})),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn find_all_paginates_active_profiles() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    for i in 0..12 {
        manager
            .on_message(
                &request(
                    patterns::PROFILE_CREATE,
                    json!({"authUserId": format!("u{}", i)}),
                ),
                &ctx,
            )
            .await
            .unwrap();
    }

    let page = manager
        .on_message(
            &request(patterns::PROFILE_FIND_ALL, json!({"page": 1, "limit": 5})),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page["total"], 12);
    assert_eq!(page["limit"], 5);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 5);

    // Defaults: page 1, limit 10.
    let page = manager
        .on_message(&request(patterns::PROFILE_FIND_ALL, json!({})), &ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page["page"], 1);
    assert_eq!(page["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn find_with_relations_collects_children() {
    let ctx = test_helpers::create_test_context();
    let manager = ProfileManager::new();

    let profile = test_helpers::create_profile(&ctx, "u1").await;

    // No children yet.
    let full = manager
        .on_message(
            &request(
                patterns::PROFILE_FIND_BY_ID_WITH_RELATIONS,
                json!({"id": profile.id}),
            ),
            &ctx,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(full["settings"], serde_json::Value::Null);
    assert_eq!(full["subscriptions"].as_array().unwrap().len(), 0);
    assert_eq!(full["status"], serde_json::Value::Null);
}
