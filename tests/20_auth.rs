mod common;

use anyhow::Result;
use axum::http::StatusCode;

use bougie_admin::database::models::NewUser;
use bougie_admin::database::UserRepository;
use common::{assert_redirect, body_json, body_text, set_cookie, TestApp, EMAIL, PASSWORD};

#[tokio::test]
async fn credentials_sign_in_sets_session_cookie() -> Result<()> {
    let app = TestApp::new().await;

    let res = app
        .post_form(
            "/api/auth/callback/credentials",
            &format!("email={}&password={}", EMAIL, PASSWORD),
            None,
        )
        .await?;
    assert_redirect(&res, "/bo");

    let cookie = set_cookie(&res).expect("session cookie");
    assert!(cookie.starts_with("bo_session="));
    assert!(cookie.contains("HttpOnly"));

    // The issued cookie opens the back-office
    let session = cookie.split(';').next().unwrap_or_default().to_string();
    let res = app.get("/bo", Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn email_lookup_ignores_case() -> Result<()> {
    let app = TestApp::new().await;

    let res = app
        .post_form(
            "/api/auth/callback/credentials",
            &format!("email=ATELIER%40example.com&password={}", PASSWORD),
            None,
        )
        .await?;
    assert_redirect(&res, "/bo");
    Ok(())
}

#[tokio::test]
async fn bad_credentials_redirect_back_to_login() -> Result<()> {
    let app = TestApp::new().await;

    for body in [
        format!("email={}&password=wrong-password", EMAIL),
        format!("email=personne%40example.com&password={}", PASSWORD),
        "email=&password=".to_string(),
        String::new(),
    ] {
        let res = app.post_form("/api/auth/callback/credentials", &body, None).await?;
        assert_redirect(&res, "/login?error=CredentialsSignin");
        assert!(set_cookie(&res).is_none());
    }
    Ok(())
}

#[tokio::test]
async fn non_bcrypt_stored_hash_cannot_sign_in() -> Result<()> {
    let app = TestApp::new().await;
    UserRepository::create(
        app.store.as_ref(),
        NewUser {
            email: "ancien@example.com".to_string(),
            name: "Ancien".to_string(),
            password_hash: format!("sha256$1$salt${}", PASSWORD),
        },
    )
    .await?;

    let res = app
        .post_form(
            "/api/auth/callback/credentials",
            &format!("email=ancien%40example.com&password={}", PASSWORD),
            None,
        )
        .await?;
    assert_redirect(&res, "/login?error=CredentialsSignin");
    assert!(set_cookie(&res).is_none());
    Ok(())
}

#[tokio::test]
async fn session_endpoint_reports_current_user() -> Result<()> {
    let app = TestApp::new().await;

    let anonymous = body_json(app.get("/api/auth/session", None).await?).await?;
    assert_eq!(anonymous["success"], true);
    assert!(anonymous["data"].is_null());

    let tampered = body_json(app.get("/api/auth/session", Some("bo_session=forged")).await?).await?;
    assert!(tampered["data"].is_null());

    let cookie = app.session_cookie().await?;
    let signed_in = body_json(app.get("/api/auth/session", Some(&cookie)).await?).await?;
    assert_eq!(signed_in["data"]["email"], EMAIL);
    assert_eq!(signed_in["data"]["name"], "Atelier");
    Ok(())
}

#[tokio::test]
async fn providers_lists_credentials() -> Result<()> {
    let app = TestApp::new().await;
    let json = body_json(app.get("/api/auth/providers", None).await?).await?;
    assert_eq!(json["data"]["credentials"]["type"], "credentials");
    Ok(())
}

#[tokio::test]
async fn signout_clears_cookie() -> Result<()> {
    let app = TestApp::new().await;
    let cookie = app.session_cookie().await?;

    let res = app.post_form("/api/auth/signout", "", Some(&cookie)).await?;
    assert_redirect(&res, "/login");

    let cleared = set_cookie(&res).expect("clearing cookie");
    assert!(cleared.starts_with("bo_session=;"));
    assert!(cleared.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn unknown_auth_action_is_404() -> Result<()> {
    let app = TestApp::new().await;

    assert_eq!(app.get("/api/auth/csrf-token", None).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.post_form("/api/auth/callback/github", "", None).await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}

#[tokio::test]
async fn login_page_shows_error_banner_only_after_failure() -> Result<()> {
    let app = TestApp::new().await;

    let plain = body_text(app.get("/login", None).await?).await?;
    assert!(plain.contains("action=\"/api/auth/callback/credentials\""));
    assert!(!plain.contains("role=\"alert\""));

    let failed = body_text(app.get("/login?error=CredentialsSignin", None).await?).await?;
    assert!(failed.contains("role=\"alert\""));
    Ok(())
}

#[tokio::test]
async fn health_follows_the_store() -> Result<()> {
    let app = TestApp::new().await;

    let res = app.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await?["data"]["status"], "ok");

    app.store.set_unavailable(true);
    let res = app.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(res).await?["success"], false);
    Ok(())
}
