//! Integration tests for the user management endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_USERNAME, PASSWORD, TestApp};

#[tokio::test]
async fn test_me_returns_summary() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.request("GET", "/api/user/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], ADMIN_USERNAME);
    assert_eq!(response.body["role"], "admin");
    assert_eq!(response.body["is_active"], true);
}

#[tokio::test]
async fn test_inactive_user_limited_to_me() {
    let app = TestApp::new().await;
    let user = app.create_user("pending@campus.test", false).await;
    let token = app.login("pending@campus.test", PASSWORD).await;

    let me = app.request("GET", "/api/user/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["is_active"], false);

    let update = app
        .request(
            "PATCH",
            &format!("/api/user/update/{}", user.id),
            Some(json!({ "first_name": "Renamed" })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
    assert_eq!(update.body["error"], "INACTIVE_ACCOUNT");
    assert_eq!(update.message(), "Inactive user");
}

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let app = TestApp::new().await;
    app.create_user("member@campus.test", true).await;
    let token = app.login("member@campus.test", PASSWORD).await;

    for path in ["/api/user/all", "/api/user/inactive", "/api/user/get/1"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.message(), "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_admin_lists_and_gets_users() {
    let app = TestApp::new().await;
    let pending = app.create_user("pending@campus.test", false).await;
    app.create_user("member@campus.test", true).await;
    let token = app.login_admin().await;

    let all = app.request("GET", "/api/user/all", None, Some(&token)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().map(Vec::len), Some(3));

    let inactive = app
        .request("GET", "/api/user/inactive", None, Some(&token))
        .await;
    assert_eq!(inactive.status, StatusCode::OK);
    let inactive = inactive.body.as_array().expect("array body");
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0]["id"], pending.id);

    let get = app
        .request(
            "GET",
            &format!("/api/user/get/{}", pending.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(get.status, StatusCode::OK);
    assert_eq!(get.body["username"], "pending@campus.test");

    let missing = app
        .request("GET", "/api/user/get/9999", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_activate_then_self_update() {
    let app = TestApp::new().await;
    let user = app.create_user("pending@campus.test", false).await;
    let admin = app.login_admin().await;

    let activate = app
        .request(
            "PATCH",
            &format!("/api/user/activate-status/{}?status=true", user.id),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(activate.status, StatusCode::OK);
    assert_eq!(activate.message(), "User activated successfully");

    let again = app
        .request(
            "PATCH",
            &format!("/api/user/activate-status/{}?status=true", user.id),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    let token = app.login("pending@campus.test", PASSWORD).await;
    let update = app
        .request(
            "PATCH",
            &format!("/api/user/update/{}", user.id),
            Some(json!({ "first_name": "Grace", "last_name": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.message(), "User updated successfully");

    let me = app.request("GET", "/api/user/me", None, Some(&token)).await;
    assert_eq!(me.body["first_name"], "Grace");
    assert_eq!(me.body["last_name"], "User");
}

#[tokio::test]
async fn test_password_change_takes_effect() {
    let app = TestApp::new().await;
    let user = app.create_user("member@campus.test", true).await;
    let token = app.login("member@campus.test", PASSWORD).await;

    let update = app
        .request(
            "PATCH",
            &format!("/api/user/update/{}", user.id),
            Some(json!({ "password": "N3w!password" })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    let old = app.login_response("member@campus.test", PASSWORD).await;
    assert_eq!(old.status, StatusCode::BAD_REQUEST);
    let new = app.login_response("member@campus.test", "N3w!password").await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_cannot_update_someone_else() {
    let app = TestApp::new().await;
    app.create_user("member@campus.test", true).await;
    let other = app.create_user("other@campus.test", true).await;
    let token = app.login("member@campus.test", PASSWORD).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/user/update/{}", other.id),
            Some(json!({ "first_name": "Mallory" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_cannot_deactivate_or_delete_self() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let me = app.request("GET", "/api/user/me", None, Some(&token)).await;
    let admin_id = me.body["id"].as_i64().expect("admin id");

    let deactivate = app
        .request(
            "PATCH",
            &format!("/api/user/activate-status/{admin_id}?status=false"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deactivate.status, StatusCode::BAD_REQUEST);
    assert_eq!(deactivate.message(), "Cannot deactivate admin user");

    let delete = app
        .request(
            "DELETE",
            &format!("/api/user/delete/{admin_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::BAD_REQUEST);
    assert_eq!(delete.message(), "Cannot delete yourself");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new().await;
    let user = app.create_user("member@campus.test", true).await;
    let user_token = app.login("member@campus.test", PASSWORD).await;
    let admin = app.login_admin().await;

    let delete = app
        .request(
            "DELETE",
            &format!("/api/user/delete/{}", user.id),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK);
    assert_eq!(delete.message(), "User deleted successfully");

    let get = app
        .request(
            "GET",
            &format!("/api/user/get/{}", user.id),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let me = app
        .request("GET", "/api/user/me", None, Some(&user_token))
        .await;
    assert_eq!(me.status, StatusCode::NOT_FOUND);
}
