//! Health checks, wire format and unreachable-service behavior.

#![allow(clippy::unwrap_used)]

use serde_json::Value;
use wishlist_console::{Notification, TransportError, WishlistForm};
use wishlist_console_integration_tests::{TestContext, console_for};

#[tokio::test]
async fn test_health_reports_healthy() {
    let ctx = TestContext::new().await.unwrap();

    let report = ctx.console.health().await.unwrap();

    assert_eq!(report.status, 200);
    assert_eq!(report.message, "Healthy");
    assert_eq!(ctx.console.notification(), None);
}

#[tokio::test]
async fn test_stub_speaks_json_errors() {
    let ctx = TestContext::new().await.unwrap();

    let response = reqwest::get(format!("{}/wishlists/missing", ctx.server.api_url()))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Wishlist with id 'missing' was not found.");
}

#[tokio::test]
async fn test_unreachable_service_uses_generic_message() {
    let port = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let console = console_for(&format!("http://127.0.0.1:{port}/api")).unwrap();
    let wishlists = console.wishlists();

    wishlists.edit(|form| {
        form.id = "7".to_string();
        form.name = "Birthday".to_string();
    });
    let _ = wishlists.retrieve().await;

    assert_eq!(console.notification(), Some(Notification::error("Server error!")));
    assert_eq!(wishlists.form(), WishlistForm::default());

    assert!(matches!(
        console.health().await,
        Err(TransportError::Request(_))
    ));
}

#[tokio::test]
async fn test_ids_are_escaped_in_paths() {
    let ctx = TestContext::new().await.unwrap();
    let wishlists = ctx.console.wishlists();

    wishlists.edit(|form| form.id = "a b".to_string());
    let _ = wishlists.retrieve().await;

    assert_eq!(
        ctx.stub().requests(),
        vec!["GET /api/wishlists/a%20b".to_string()]
    );
    assert_eq!(
        ctx.console.notification(),
        Some(Notification::error("Wishlist with id 'a b' was not found."))
    );
}
