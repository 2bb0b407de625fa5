//! Join-key checks and staff registration through the console.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use tavola_core::join_key::{DEMO_MANAGER_KEY, DEMO_RESTAURANT_KEY};
use tavola_integration_tests::{FakeBackend, TAKEN_EMAIL, TestConsole, location};

#[tokio::test]
async fn test_join_key_fragment_states() {
    let backend = FakeBackend::start().await;
    let console = TestConsole::start(backend.url()).await;

    let valid = console
        .get(&format!("/auth/join-key?kind=restaurant&key={DEMO_RESTAURANT_KEY}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(valid.contains("join-key--valid"));
    assert!(valid.contains("Mykonos Mediterranean"));

    let invalid = console
        .get("/auth/join-key?kind=restaurant&key=REST-NOPE")
        .await
        .text()
        .await
        .unwrap();
    assert!(invalid.contains("join-key--invalid"));

    let blank = console
        .get("/auth/join-key?kind=manager&key=")
        .await
        .text()
        .await
        .unwrap();
    assert!(blank.contains("join-key--unknown"));
}

#[tokio::test]
async fn test_join_key_kind_follows_role() {
    let backend = FakeBackend::start().await;
    let console = TestConsole::start(backend.url()).await;

    let html = console
        .get(&format!("/auth/join-key?role=pos_user&join_key={DEMO_MANAGER_KEY}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("join-key--valid"));
    assert!(html.contains("Elena Vasquez"));
}

#[tokio::test]
async fn test_pos_signup_with_manager_key() {
    let backend = FakeBackend::start().await;
    let console = TestConsole::start(backend.url()).await;

    let resp = console
        .post_form(
            "/auth/signup",
            &[
                ("full_name", "Sofia Karras"),
                ("email", "sofia@mykonos-mediterranean.com"),
                ("password", "kitchen-2026"),
                ("password_confirm", "kitchen-2026"),
                ("role", "pos_user"),
                ("join_key", DEMO_MANAGER_KEY),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp).unwrap().to_owned();
    assert!(target.starts_with("/auth/login?registered="));

    let html = console.get(&target).await.text().await.unwrap();
    assert!(html.contains("You joined Elena Vasquez"));
}

#[tokio::test]
async fn test_signup_with_wrong_key_is_rejected_locally() {
    let backend = FakeBackend::start().await;
    let console = TestConsole::start(backend.url()).await;

    let resp = console
        .post_form(
            "/auth/signup",
            &[
                ("full_name", "Sofia Karras"),
                ("email", "sofia@mykonos-mediterranean.com"),
                ("password", "kitchen-2026"),
                ("password_confirm", "kitchen-2026"),
                ("role", "manager"),
                ("join_key", DEMO_MANAGER_KEY),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("Restaurant key"));
}

#[tokio::test]
async fn test_signup_backend_refusal_is_shown() {
    let backend = FakeBackend::start().await;
    let console = TestConsole::start(backend.url()).await;

    let resp = console
        .post_form(
            "/auth/signup",
            &[
                ("full_name", "Nikos Papadopoulos"),
                ("email", TAKEN_EMAIL),
                ("password", "taverna-owner"),
                ("password_confirm", "taverna-owner"),
                ("role", "restaurant_admin"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("Email already registered"));
}
