//! Wire-level behaviour of the API client: token attachment, timeout
//! ceiling, error preservation.

use std::time::{Duration, Instant};

use partsgrid_client::api::ApiError;
use partsgrid_client::cookies::{self, CookieOptions};
use partsgrid_integration_tests::{TestContext, token_expiring_in};

#[tokio::test]
async fn test_token_attached_when_cookie_present() {
    let ctx = TestContext::start().await;
    let token = token_expiring_in(3600);
    ctx.jar.set(cookies::TOKEN, &token, CookieOptions::default());

    let _ = ctx
        .client
        .get::<serde_json::Value>("/orders")
        .await
        .expect("orders fetch");

    let headers = ctx.observed.auth_headers();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].as_deref(), Some(format!("Bearer {token}").as_str()));
}

#[tokio::test]
async fn test_header_absent_without_cookie() {
    let ctx = TestContext::start().await;

    // Unauthenticated request proceeds (and the backend rejects it);
    // the client must not have invented a header.
    let result = ctx.client.get::<serde_json::Value>("/orders").await;
    assert!(result.is_err());

    let headers = ctx.observed.auth_headers();
    assert_eq!(headers.len(), 1);
    assert!(headers[0].is_none());
}

#[tokio::test]
async fn test_timeout_ceiling_is_distinguishable() {
    let ctx = TestContext::start_with_timeout(Duration::from_millis(300)).await;

    let started = Instant::now();
    let result = ctx.client.get::<serde_json::Value>("/hang").await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(ApiError::Timeout)));
    // Rejected promptly after the ceiling, not after the route's hour.
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_secs(5));
}

#[tokio::test]
async fn test_status_error_preserves_message_and_body() {
    let ctx = TestContext::start().await;
    let token = token_expiring_in(3600);
    ctx.jar.set(cookies::TOKEN, &token, CookieOptions::default());

    let err = ctx
        .client
        .post_empty::<serde_json::Value>("/orders/9999/cancel")
        .await
        .expect_err("cancel must be rejected");

    match err {
        ApiError::Status {
            status,
            message,
            body,
        } => {
            assert_eq!(status.as_u16(), 409);
            assert_eq!(message, "Order already shipped");
            assert!(body.contains("Order already shipped"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthenticated_rejection_reads_as_auth_failure() {
    let ctx = TestContext::start().await;
    let err = ctx
        .client
        .get::<serde_json::Value>("/orders")
        .await
        .expect_err("must be rejected");
    assert!(err.is_auth_failure());
    assert_eq!(err.user_message(), "Session expired");
}

#[tokio::test]
async fn test_non_envelope_body_is_a_parse_error() {
    let ctx = TestContext::start().await;
    let err = ctx
        .client
        .get::<serde_json::Value>("/broken")
        .await
        .expect_err("must fail to parse");
    assert!(matches!(err, ApiError::Parse(_)));
}
