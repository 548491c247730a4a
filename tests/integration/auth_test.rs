//! Integration tests for login, signup, refresh and logout.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_PASSWORD, ADMIN_USERNAME, PASSWORD, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "UP");
}

#[tokio::test]
async fn test_login_success_sets_refresh_cookie() {
    let app = TestApp::new().await;
    let response = app.login_response(ADMIN_USERNAME, ADMIN_PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    assert!(response.body["access_token"].as_str().is_some());

    let cookie = response
        .set_cookie("refresh_token")
        .expect("refresh cookie missing");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let response = app.login_response(ADMIN_USERNAME, "Wr0ng!password").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Incorrect username or password");
    assert!(response.set_cookie("refresh_token").is_none());
}

#[tokio::test]
async fn test_login_unknown_user_same_message() {
    let app = TestApp::new().await;
    let response = app.login_response("ghost@campus.test", PASSWORD).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Incorrect username or password");
}

#[tokio::test]
async fn test_inactive_user_can_login() {
    let app = TestApp::new().await;
    app.create_user("pending@campus.test", false).await;

    let response = app.login_response("pending@campus.test", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_creates_inactive_user() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "username": "student@campus.test",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "password": PASSWORD
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["username"], "student@campus.test");
    assert_eq!(response.body["is_active"], false);
    assert_eq!(response.body["role"], "user");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::new().await;
    let body = json!({
        "username": ADMIN_USERNAME,
        "first_name": "Second",
        "last_name": "Admin",
        "password": PASSWORD
    });

    let response = app
        .request("POST", "/api/auth/signup", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = TestApp::new().await;

    let bad_email = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "username": "not-an-email",
                "first_name": "A",
                "last_name": "B",
                "password": PASSWORD
            })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let weak_password = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "username": "weak@campus.test",
                "first_name": "A",
                "last_name": "B",
                "password": "short"
            })),
            None,
        )
        .await;
    assert_eq!(weak_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_with_cookie() {
    let app = TestApp::new().await;
    let login = app.login_response(ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let cookie = login.cookie_pair("refresh_token").expect("no cookie");

    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", &cookie, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");

    let access = response.body["access_token"].as_str().expect("no token");
    let me = app.request("GET", "/api/user/me", None, Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], ADMIN_USERNAME);
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/api/auth/refresh", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Refresh token not found");
}

#[tokio::test]
async fn test_refresh_with_garbage_cookie() {
    let app = TestApp::new().await;
    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", "refresh_token=garbage", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid refresh token");
}

#[tokio::test]
async fn test_logout_revokes_tokens() {
    let app = TestApp::new().await;
    let login = app.login_response(ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let access = login.body["access_token"]
        .as_str()
        .expect("no token")
        .to_string();
    let cookie = login.cookie_pair("refresh_token").expect("no cookie");

    let logout = app
        .request_with_cookie("POST", "/api/auth/logout", &cookie, Some(&access))
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.message(), "Logout successful");

    let me = app.request("GET", "/api/user/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let refresh = app
        .request_with_cookie("POST", "/api/auth/refresh", &cookie, None)
        .await;
    assert_eq!(refresh.status, StatusCode::BAD_REQUEST);
    assert_eq!(refresh.message(), "Invalid refresh token");
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_with_undecodable_token() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/auth/logout", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid token");
}

#[tokio::test]
async fn test_protected_route_rejects_bad_tokens() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/user/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/user/me", None, Some("garbage"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.message(), "User not authenticated");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let expired = app
        .state
        .tokens
        .issue_access_with_ttl(ADMIN_USERNAME, chrono::Duration::seconds(-60))
        .expect("issue token");

    let response = app
        .request("GET", "/api/user/me", None, Some(&expired))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = TestApp::new().await;
    let foreign = campus_auth::TokenCodec::new("some-other-secret", "HS256")
        .expect("codec")
        .encode(&campus_auth::Claims::new(
            ADMIN_USERNAME,
            chrono::Utc::now() + chrono::Duration::minutes(5),
        ))
        .expect("encode");

    let response = app
        .request("GET", "/api/user/me", None, Some(&foreign))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
