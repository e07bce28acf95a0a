//! HTTP-level integration tests for auth and admin user management.
//!
//! Tests cover login, token refresh, logout, RBAC enforcement,
//! admin user management, and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;
use depot_api::auth::password::hash_password;
use depot_db::models::user::CreateUser;
use depot_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the user row plus
/// the plaintext password used.
async fn create_test_user(
    pool: &PgPool,
    username: &str,
    role_id: i64,
) -> (depot_db::models::user::User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        role_id,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in a user via the API and return the JSON response containing
/// `access_token`, `refresh_token`, and `user` info.
async fn login_user(
    app: axum::Router,
    username: &str,
    password: &str,
) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Auth flow tests
// ---------------------------------------------------------------------------

/// Successful login returns 200 with access_token, refresh_token, and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "loginuser", 1).await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "loginuser", &password).await;

    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["refresh_token"].is_string(), "response must contain refresh_token");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["email"], "loginuser@test.com");
    assert_eq!(json["user"]["role"], "admin");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "wrongpw", 1).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "inactive", 1).await;
    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "inactive", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A valid refresh token returns new tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresher", 1).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "refresher", &password).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string(), "refreshed response must contain access_token");
    assert!(json["refresh_token"].is_string(), "refreshed response must contain refresh_token");
    // Token rotation: the new refresh token must differ from the original.
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );
}

/// A rotated-out refresh token is revoked and cannot be used again.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_token_single_use(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "reuser", 1).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "reuser", &password).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Replaying the original token must fail now.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes sessions and returns 204 No Content.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "logoutuser", 1).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "logoutuser", &password).await;
    let access_token = login_json["access_token"].as_str().unwrap();
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({});
    let response = post_json_auth(app, "/api/v1/auth/logout", body, access_token).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token from before logout must no longer work.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// RBAC enforcement tests
// ---------------------------------------------------------------------------

/// Admin endpoints require authentication -- missing token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_endpoint_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A non-admin user (storekeeper, role_id=2) is forbidden from admin endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_endpoint_requires_admin_role(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "keeperuser", 2).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "keeperuser", &password).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A malformed Authorization header returns 401, not 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_authorization_header(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "malformed", 1).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Admin user management tests
// ---------------------------------------------------------------------------

/// Admin can create a new user via POST /admin/users and receives 201.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_user(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "adminmgr", 1).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "adminmgr", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let new_user_body = serde_json::json!({
        "username": "newuser",
        "email": "newuser@test.com",
        "password": "strong_password_123!",
        "role_id": 2
    });
    let response =
        post_json_auth(app, "/api/v1/admin/users", new_user_body, token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newuser");
    assert_eq!(json["email"], "newuser@test.com");
    assert_eq!(json["role"], "storekeeper");
    assert_eq!(json["role_id"], 2);
    assert!(json["is_active"].as_bool().unwrap());
}

/// Creating a user with a role id that does not exist returns 422.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_user_unknown_role(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "roleadmin", 1).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "roleadmin", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "username": "orphanrole",
        "email": "orphanrole@test.com",
        "password": "strong_password_123!",
        "role_id": 999
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");
}

/// Creating a user with a password shorter than 12 chars returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_user_weak_password(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "pwadmin", 1).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "pwadmin", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "username": "weakpw",
        "email": "weakpw@test.com",
        "password": "short1!",
        "role_id": 2
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Admin can list users via GET /admin/users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_list_users(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "listadmin", 1).await;
    // Create a second user so the list has more than one entry.
    let (_user2, _) = create_test_user(&pool, "listuser2", 2).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "listadmin", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().expect("response body should be an array");
    assert!(
        users.len() >= 2,
        "list should contain at least the two created users"
    );
}

/// Admin can change a user's role via PUT /admin/users/{id}.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_update_user_role(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "promoadmin", 1).await;
    let (user, _) = create_test_user(&pool, "promotee", 4).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "promoadmin", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "role_id": 3 });
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}", user.id),
        body,
        token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role_id"], 3);
    assert_eq!(json["role"], "technician");
}

/// Deactivating a user makes their logins fail with 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_deactivate_user(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "deactadmin", 1).await;
    let (user, password) = create_test_user(&pool, "victim", 4).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "deactadmin", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/deactivate", user.id),
        serde_json::json!({}),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "victim", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admin can reset a user's password; the old one stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_reset_password(pool: PgPool) {
    let (_admin, admin_pw) = create_test_user(&pool, "resetadmin", 1).await;
    let (user, old_password) = create_test_user(&pool, "resetme", 2).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "resetadmin", &admin_pw).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "new_password": "brand_new_password_456!" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/reset-password", user.id),
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": "resetme", "password": old_password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New password does.
    let app = common::build_test_app(pool);
    let _ = login_user(app, "resetme", "brand_new_password_456!").await;
}

/// Account lockout: after 5 failed login attempts the account is locked.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_account_lockout(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "lockme", 1).await;

    // Fail login 5 times with the wrong password to trigger the lock.
    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "username": "lockme", "password": "wrong_pass" });
        let response = post_json(app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The 6th attempt (even with the wrong password) should return 403 (locked).
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "lockme", "password": "wrong_pass" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    let error_msg = json["error"].as_str().unwrap_or("");
    assert!(
        error_msg.contains("locked"),
        "error message should mention the account is locked, got: {error_msg}"
    );
}
