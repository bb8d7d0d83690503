//! Gateway integration tests: bearer-token attachment, the pagination
//! envelope and download redirect resolution, all against the in-process
//! mock backend.

use serde_json::Value;

use sakti::api::{marketing, services};
use sakti::error::AppError;
use sakti::gateway::Gateway;
use sakti::session::TokenCell;

mod common;

fn gateway_with(base: reqwest::Url) -> (Gateway, TokenCell) {
    let tokens = TokenCell::new();
    let gw = Gateway::new(base, tokens.clone()).unwrap();
    (gw, tokens)
}

#[tokio::test]
async fn bearer_header_attached_only_when_token_present() {
    let (base, _) = common::spawn_backend().await;
    let (gw, tokens) = gateway_with(base);

    // no session: the call still succeeds and carries no header
    let echoed: Value = gw.get("/echo-auth").await.unwrap();
    assert_eq!(echoed["authorization"], Value::Null);

    tokens.set(Some("tok-admin".to_string()));
    let echoed: Value = gw.get("/echo-auth").await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer tok-admin");

    // token read fresh at call time: clearing it takes effect immediately
    tokens.set(None);
    let echoed: Value = gw.get("/echo-auth").await.unwrap();
    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn list_endpoint_parses_pagination_envelope() {
    let (base, _) = common::spawn_backend().await;
    let (gw, _) = gateway_with(base);

    let page = services::list(&gw, 1, 15, None).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].name, "Managed WAN");
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.current_page, 1);
}

#[tokio::test]
async fn download_resolves_redirect_location() {
    let (base, _) = common::spawn_backend().await;
    let (gw, _) = gateway_with(base.clone());

    let url = marketing::download_url(&gw, 5).await.unwrap();
    assert_eq!(url, base.join("/files/kit-5.pdf").unwrap());
}

#[tokio::test]
async fn missing_route_maps_to_not_found() {
    let (base, _) = common::spawn_backend().await;
    let (gw, _) = gateway_with(base);

    let err = gw.get::<Value>("/no-such-endpoint").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // nothing listens on this port
    let base = reqwest::Url::parse("http://127.0.0.1:1").unwrap();
    let (gw, _) = gateway_with(base);

    let err = gw.get::<Value>("/services").await.unwrap_err();
    assert!(matches!(err, AppError::Transport { .. }));
}
