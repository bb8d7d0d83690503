//! In-process mock of the SAKTI backend used by the integration tests.
//! Tokens encode the account's role (`tok-admin`, `tok-viewer`) so the
//! profile endpoint can answer per session without real state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Clone, Default)]
pub struct Counters {
    pub profile_hits: Arc<AtomicUsize>,
}

impl Counters {
    pub fn profile_calls(&self) -> usize {
        self.profile_hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_backend() -> (reqwest::Url, Counters) {
    let counters = Counters::default();
    let app = router(counters.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let base = reqwest::Url::parse(&format!("http://{}", addr)).expect("url");
    (base, counters)
}

fn router(counters: Counters) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/echo-auth", get(echo_auth))
        .route("/services", get(services))
        .route("/marketing-kits/{id}/download", get(download))
        .with_state(counters)
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    let email = body.get("email").and_then(|v| v.as_str()).unwrap_or("");
    let password = body.get("password").and_then(|v| v.as_str()).unwrap_or("");
    if password != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        );
    }
    // The slow account simulates a login response arriving after a logout
    if email.starts_with("slow-") {
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    }
    let role = email.split('@').next().unwrap_or("viewer").trim_start_matches("slow-");
    (StatusCode::OK, Json(json!({ "token": format!("tok-{}", role) })))
}

async fn profile(State(counters): State<Counters>, headers: HeaderMap) -> impl IntoResponse {
    counters.profile_hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let user = match auth {
        "Bearer tok-admin" => json!({
            "id": 1, "name": "Admin One", "email": "admin@sakti.test",
            "role": "admin", "unit": { "id": 1, "name": "HQ" }
        }),
        "Bearer tok-viewer" => json!({
            "id": 2, "name": "View Only", "email": "viewer@sakti.test",
            "role": "viewer", "unit": { "id": 2, "name": "Sales" }
        }),
        "Bearer tok-pdo" => json!({
            "id": 3, "name": "Pdo Person", "email": "pdo@sakti.test",
            "role": "pdo", "unit": { "id": 3, "name": "Product" }
        }),
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Token expired" })),
            );
        }
    };
    (StatusCode::OK, Json(json!({ "user": user })))
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    Json(json!({ "authorization": auth }))
}

async fn services() -> Json<Value> {
    Json(json!({
        "data": [
            { "id": 1, "name": "Managed WAN" },
            { "id": 2, "name": "Cloud Backup" }
        ],
        "pagination": { "total_pages": 3, "current_page": 1 }
    }))
}

async fn download(Path(id): Path<i64>) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, format!("/files/kit-{}.pdf", id))],
    )
}
