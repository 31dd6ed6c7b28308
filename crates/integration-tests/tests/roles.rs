//! Role selection, admin login, logout, and gating of the listing and upload
//! pages.

#![allow(clippy::unwrap_used)]

use model_showcase_integration_tests::{
    TestApp, assert_redirect, cookieless_client, new_client, ok_text, set_cookie_pair,
};
use reqwest::{StatusCode, header::COOKIE};

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let body = ok_text(app.get("/health").await).await;

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_is_public() {
    let app = TestApp::spawn().await;

    let body = ok_text(app.get("/").await).await;

    assert!(body.contains("/set_role/user"));
    assert!(body.contains("/set_role/admin"));
}

#[tokio::test]
async fn test_products_without_role_redirects_home() {
    let app = TestApp::spawn().await;

    let res = app.get("/products").await;

    assert_redirect(&res, "/");
}

#[tokio::test]
async fn test_upload_without_role_redirects_home() {
    let app = TestApp::spawn().await;

    assert_redirect(&app.get("/upload").await, "/");
    assert_redirect(
        &app.upload("Chair", "Oak", "chair.glb", b"glTF").await,
        "/",
    );
    assert!(app.stored_products().is_empty());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_set_role_user_grants_access() {
    let app = TestApp::spawn().await;

    app.become_user().await;

    let body = ok_text(app.get("/products").await).await;
    assert!(body.contains("user"));
    assert_eq!(app.get("/upload").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_set_role_admin_goes_to_login_without_granting_access() {
    let app = TestApp::spawn().await;

    assert_redirect(&app.get("/set_role/admin").await, "/login");
    assert_redirect(&app.get("/products").await, "/");
}

#[tokio::test]
async fn test_set_role_unknown_goes_home() {
    let app = TestApp::spawn().await;

    assert_redirect(&app.get("/set_role/superuser").await, "/");
    assert_redirect(&app.get("/set_role/User").await, "/");
    assert_redirect(&app.get("/products").await, "/");
}

#[tokio::test]
async fn test_login_page_renders_form() {
    let app = TestApp::spawn().await;

    let body = ok_text(app.get("/login").await).await;

    assert!(body.contains(r#"name="username""#));
    assert!(body.contains(r#"name="password""#));
}

#[tokio::test]
async fn test_admin_login_grants_access() {
    let app = TestApp::spawn().await;

    app.login_admin().await;

    let body = ok_text(app.get("/products").await).await;
    assert!(body.contains("admin"));
}

#[tokio::test]
async fn test_invalid_login_returns_message_and_no_access() {
    let app = TestApp::spawn().await;

    for (username, password) in [
        ("admin", "wrong"),
        ("root", "admin123"),
        ("Admin", "admin123"),
        ("", ""),
    ] {
        let res = app
            .post_form("/login", &[("username", username), ("password", password)])
            .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.text().await.unwrap(), "Invalid admin credentials");
        assert_redirect(&app.get("/products").await, "/");
    }
}

#[tokio::test]
async fn test_failed_login_keeps_existing_user_role() {
    let app = TestApp::spawn().await;
    app.become_user().await;

    let res = app
        .post_form("/login", &[("username", "admin"), ("password", "nope")])
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = ok_text(app.get("/products").await).await;
    assert!(body.contains("user"));
}

#[tokio::test]
async fn test_logout_clears_role() {
    let app = TestApp::spawn().await;
    app.login_admin().await;

    assert_redirect(&app.get("/logout").await, "/");

    assert_redirect(&app.get("/products").await, "/");
}

#[tokio::test]
async fn test_logout_without_session_goes_home() {
    let app = TestApp::spawn().await;

    assert_redirect(&app.get("/logout").await, "/");
}

#[tokio::test]
async fn test_roles_are_per_client() {
    let app = TestApp::spawn().await;
    app.become_user().await;

    let other = new_client();
    let res = other.get(app.url("/products")).send().await.unwrap();

    assert_redirect(&res, "/");
}

#[tokio::test]
async fn test_unsigned_role_cookie_is_ignored() {
    let app = TestApp::spawn().await;

    let res = cookieless_client()
        .get(app.url("/products"))
        .header(COOKIE, "showcase_session=admin")
        .send()
        .await
        .unwrap();

    assert_redirect(&res, "/");
}

#[tokio::test]
async fn test_role_cookie_is_accepted_by_instance_with_same_secret() {
    let first = TestApp::spawn().await;
    let second = TestApp::spawn().await;
    let client = cookieless_client();

    let res = client.get(first.url("/set_role/user")).send().await.unwrap();
    assert_redirect(&res, "/products");
    let cookie = set_cookie_pair(&res);

    let res = client
        .get(second.url("/products"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();

    let body = ok_text(res).await;
    assert!(body.contains("user"));
}

#[tokio::test]
async fn test_role_cookie_is_rejected_by_instance_with_other_secret() {
    let first = TestApp::spawn().await;
    let second = TestApp::spawn_with_secret("another-secret-with-enough-entropy-91c4e2").await;
    let client = cookieless_client();

    let res = client.get(first.url("/set_role/user")).send().await.unwrap();
    let cookie = set_cookie_pair(&res);

    let res = client
        .get(second.url("/products"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();

    assert_redirect(&res, "/");
}

#[tokio::test]
async fn test_login_with_missing_field_is_bad_request() {
    let app = TestApp::spawn().await;

    let res = app.post_form("/login", &[("username", "admin")]).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_redirect(&app.get("/products").await, "/");
}
