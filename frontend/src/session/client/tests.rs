use std::rc::Rc;
use std::sync::Arc;

use super::*;
use crate::session::token_store::testing::MemoryTokenStore;
use crate::session::transport::testing::MockTransport;
use agromod_shared::protocol::{HttpMethod, ListProductsRequest, MeRequest};
use agromod_shared::Listing;

const ME: &str = "/api/auth/me/";
const REFRESH: &str = "/api/auth/refresh/";
const PRODUCTS: &str = "/api/products/";

fn user_json() -> &'static str {
    r#"{"id":7,"email":"asha@example.com","first_name":"Asha","last_name":"Patel","role":"farmer"}"#
}

fn client_with(
    access: Option<&str>,
    refresh: Option<&str>,
) -> (
    SessionClient<MemoryTokenStore, Rc<MockTransport>>,
    Rc<MockTransport>,
) {
    let store = Arc::new(MemoryTokenStore::with_tokens(access, refresh));
    let transport = MockTransport::new();
    let client = SessionClient::new("", store, transport.clone());
    (client, transport)
}

#[tokio::test]
async fn bearer_header_attached_when_access_token_present() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue(HttpMethod::Get, ME, 200, user_json());

    let user = client.send(&MeRequest).await.unwrap();
    assert_eq!(user.email, "asha@example.com");
    assert_eq!(transport.log(), vec![format!("GET {} auth=Bearer T1", ME)]);
}

#[tokio::test]
async fn no_auth_header_without_access_token() {
    let (client, transport) = client_with(None, None);
    transport.enqueue(HttpMethod::Get, PRODUCTS, 200, "[]");

    let listing: Listing<_> = client.send(&ListProductsRequest).await.unwrap();
    assert!(listing.is_empty());
    assert_eq!(transport.log(), vec![format!("GET {}", PRODUCTS)]);
}

#[tokio::test]
async fn expired_access_token_is_refreshed_and_request_resubmitted_once() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue(HttpMethod::Get, ME, 401, r#"{"detail":"expired"}"#);
    transport.enqueue(HttpMethod::Post, REFRESH, 200, r#"{"access":"T2"}"#);
    transport.enqueue(HttpMethod::Get, ME, 200, user_json());

    let user = client.send(&MeRequest).await.unwrap();
    assert_eq!(user.id, 7);

    // First attempt with the stale token, refresh exchange, then one
    // resubmission carrying the fresh token.
    assert_eq!(
        transport.log(),
        vec![
            format!("GET {} auth=Bearer T1", ME),
            format!("POST {}", REFRESH),
            format!("GET {} auth=Bearer T2", ME),
        ]
    );

    // Only the access token was replaced.
    let pair = client.store().read();
    assert_eq!(pair.access.as_deref(), Some("T2"));
    assert_eq!(pair.refresh.as_deref(), Some("R1"));
}

#[tokio::test]
async fn refresh_request_carries_no_auth_header() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue(HttpMethod::Get, ME, 401, "");
    transport.enqueue(HttpMethod::Post, REFRESH, 200, r#"{"access":"T2"}"#);
    transport.enqueue(HttpMethod::Get, ME, 200, user_json());

    client.send(&MeRequest).await.unwrap();

    let log = transport.log();
    assert_eq!(log[1], format!("POST {}", REFRESH));
    assert!(!log[1].contains("auth="));
}

#[tokio::test]
async fn second_401_after_refresh_is_returned_without_another_refresh() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue(HttpMethod::Get, ME, 401, "");
    transport.enqueue(HttpMethod::Post, REFRESH, 200, r#"{"access":"T2"}"#);
    transport.enqueue(HttpMethod::Get, ME, 401, r#"{"detail":"still no"}"#);

    let err = client.send(&MeRequest).await.unwrap_err();
    assert!(err.is_unauthorized());

    // Exactly one refresh exchange and no third submission.
    assert_eq!(transport.hits(REFRESH), 1);
    assert_eq!(transport.hits(ME), 2);

    // A failed resubmission is not a session-terminating event.
    assert_eq!(client.store().read().refresh.as_deref(), Some("R1"));
}

#[tokio::test]
async fn refresh_failure_clears_store_and_surfaces_original_401() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue(HttpMethod::Get, ME, 401, r#"{"detail":"expired"}"#);
    transport.enqueue(HttpMethod::Post, REFRESH, 401, r#"{"detail":"refresh revoked"}"#);

    let expired = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = expired.clone();
    client.set_session_expired_hook(move || flag.store(true, std::sync::atomic::Ordering::SeqCst));

    let err = client.send(&MeRequest).await.unwrap_err();

    // Caller sees the original request's 401, not the refresh error.
    assert_eq!(err, ApiError::http(401, r#"{"detail":"expired"}"#));
    assert_eq!(client.store().read(), Default::default());
    assert!(expired.load(std::sync::atomic::Ordering::SeqCst));
    assert_eq!(transport.hits(ME), 1);
}

#[tokio::test]
async fn missing_refresh_token_returns_401_without_refresh_attempt() {
    let (client, transport) = client_with(Some("T1"), None);
    transport.enqueue(HttpMethod::Get, ME, 401, "");

    let err = client.send(&MeRequest).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(transport.hits(REFRESH), 0);
    // Credentials untouched.
    assert_eq!(client.store().read().access.as_deref(), Some("T1"));
}

#[tokio::test]
async fn non_401_errors_pass_through_untouched() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue(HttpMethod::Get, ME, 500, "boom");

    let err = client.send(&MeRequest).await.unwrap_err();
    assert_eq!(err, ApiError::http(500, "boom"));
    assert_eq!(transport.hits(REFRESH), 0);
    assert_eq!(client.store().read().refresh.as_deref(), Some("R1"));
}

#[tokio::test]
async fn network_errors_pass_through_untouched() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    transport.enqueue_error(HttpMethod::Get, ME, ApiError::network("offline"));

    let err = client.send(&MeRequest).await.unwrap_err();
    assert_eq!(err, ApiError::network("offline"));
    assert_eq!(transport.hits(REFRESH), 0);
}

#[tokio::test]
async fn concurrent_requests_refresh_independently() {
    let (client, transport) = client_with(Some("T1"), Some("R1"));
    // Two requests hit 401 with the stale token; each runs its own
    // refresh exchange (no cross-request dedup).
    transport.enqueue(HttpMethod::Get, ME, 401, "");
    transport.enqueue(HttpMethod::Get, ME, 200, user_json());
    transport.enqueue(HttpMethod::Get, PRODUCTS, 401, "");
    transport.enqueue(HttpMethod::Get, PRODUCTS, 200, "[]");
    transport.enqueue(HttpMethod::Post, REFRESH, 200, r#"{"access":"T2"}"#);
    transport.enqueue(HttpMethod::Post, REFRESH, 200, r#"{"access":"T3"}"#);

    let (me, products) = tokio::join!(client.send(&MeRequest), client.send(&ListProductsRequest));
    assert!(me.is_ok());
    assert!(products.is_ok());
    assert_eq!(transport.hits(REFRESH), 2);
}

#[tokio::test]
async fn empty_success_body_decodes_unit_style_responses() {
    use agromod_shared::protocol::ResetPasswordRequest;

    let (client, transport) = client_with(None, None);
    transport.enqueue(HttpMethod::Post, "/api/auth/reset-password/", 200, "");

    let req = ResetPasswordRequest {
        email: "asha@example.com".into(),
        token: "tok".into(),
        new_password: "hunter2".into(),
    };
    assert!(client.send(&req).await.is_ok());
}

#[tokio::test]
async fn base_url_is_prefixed_and_normalized() {
    let store = Arc::new(MemoryTokenStore::new());
    let transport = MockTransport::new();
    let client = SessionClient::new("https://api.agromod.in/", store, transport.clone());
    transport.enqueue(
        HttpMethod::Get,
        "https://api.agromod.in/api/products/",
        200,
        "[]",
    );

    let listing = client.send(&ListProductsRequest).await.unwrap();
    assert_eq!(listing.len(), 0);
}
