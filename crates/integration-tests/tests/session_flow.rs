//! End-to-end session flows: login, fetch-into-slice, logout.

use secrecy::SecretString;

use partsgrid_core::{Email, OrderId, Role};
use partsgrid_client::cookies;
use partsgrid_client::services::auth::AuthService;
use partsgrid_client::services::orders::{OrderListQuery, OrdersService};
use partsgrid_client::store::{Store, dispatch};
use partsgrid_integration_tests::{DEALER_ID, TestContext, USER_ID};

fn credentials() -> (Email, SecretString) {
    (
        Email::parse("dealer@example.com").expect("email"),
        SecretString::from("a-fine-password"),
    )
}

#[tokio::test]
async fn test_login_persists_token_and_dealer_cookies() {
    let ctx = TestContext::start().await;
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let (email, password) = credentials();

    let session = auth.login(&email, &password).await.expect("login");

    assert_eq!(session.user_id.map(i64::from), Some(USER_ID));
    assert_eq!(session.role, Some(Role::Dealer));
    assert_eq!(session.dealer_id.map(i64::from), Some(DEALER_ID));
    assert_eq!(
        ctx.jar.get(cookies::TOKEN).as_deref(),
        Some(session.token.as_str())
    );
    assert_eq!(
        ctx.jar.get(cookies::DEALER_ID).as_deref(),
        Some(DEALER_ID.to_string().as_str())
    );
}

#[tokio::test]
async fn test_login_then_fetch_lands_in_orders_slice() {
    let ctx = TestContext::start().await;
    let store = Store::new();
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let (email, password) = credentials();

    auth.login(&email, &password).await.expect("login");

    let orders = OrdersService::new(&ctx.client);
    dispatch(store.orders(), orders.list(&OrderListQuery::default()))
        .await
        .expect("orders fetch");

    let snapshot = store.orders().snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
    let page = snapshot.data.as_ref().expect("orders cached");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, OrderId::new(9001));

    // The fetch went out with the freshly issued bearer token.
    let headers = ctx.observed.auth_headers();
    let last = headers.last().expect("recorded").as_deref().expect("bearer");
    assert!(last.starts_with("Bearer "));
}

#[tokio::test]
async fn test_rejected_login_leaves_no_session() {
    let ctx = TestContext::start().await;
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let email = Email::parse("dealer@example.com").expect("email");

    let err = auth
        .login(&email, &SecretString::from("wrong"))
        .await
        .expect_err("login must fail");

    assert!(err.to_string().contains("Invalid credentials"));
    assert!(ctx.jar.get(cookies::TOKEN).is_none());
}

#[tokio::test]
async fn test_failed_fetch_records_error_and_keeps_stale_data() {
    let ctx = TestContext::start().await;
    let store = Store::new();
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let (email, password) = credentials();
    auth.login(&email, &password).await.expect("login");

    let orders = OrdersService::new(&ctx.client);
    dispatch(store.orders(), orders.list(&OrderListQuery::default()))
        .await
        .expect("first fetch");

    // Kill the session server-side view by dropping the cookie, then
    // fetch again: the slice keeps its stale data and records the error.
    ctx.jar.delete(cookies::TOKEN);
    let result = dispatch(store.orders(), orders.list(&OrderListQuery::default())).await;
    assert!(result.is_err());

    let snapshot = store.orders().snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.data.is_some());
    assert!(
        snapshot
            .error
            .as_deref()
            .is_some_and(|m| m.contains("Session expired"))
    );
}

#[tokio::test]
async fn test_logout_clears_cookies_and_store() {
    let ctx = TestContext::start().await;
    let store = Store::new();
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let (email, password) = credentials();
    auth.login(&email, &password).await.expect("login");

    let orders = OrdersService::new(&ctx.client);
    dispatch(store.orders(), orders.list(&OrderListQuery::default()))
        .await
        .expect("orders fetch");

    auth.logout().await;
    store.clear_session();

    assert!(ctx.jar.get(cookies::TOKEN).is_none());
    assert!(ctx.jar.get(cookies::DEALER_ID).is_none());
    assert!(store.orders().snapshot().data.is_none());
}
