//! Integration tests: account flow, authentication gate, route policy, listings.
//!
//! Run with `cargo test`. Everything runs against the in-memory store; the
//! PostgreSQL round trip at the bottom runs only when `TEST_DATABASE_URL` is set.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use jobs::auth::{AuthAppService, TokenCodec};
use jobs::db::{self, MemoryStore, PgStore, Store};
use jobs::models::{NewAccount, UserType};
use jobs::{create_app, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

const SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

fn tokens() -> TokenCodec {
    TokenCodec::new(SECRET, 1)
}

fn test_app() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::new(Arc::new(store.clone()), tokens())
        .with_static_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/static"));
    (create_app(state), store)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {}", token));
    }
    req.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {}", token));
    }
    req.body(Body::empty()).unwrap()
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, String) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn parse(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}

async fn register_and_login(app: &axum::Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password, "companyName": "ACME" });
    let (status, _) = send(app, json_request("POST", "/auth/industry/register", None, body)).await;
    assert_eq!(status, StatusCode::OK);

    let body = serde_json::json!({ "email": email, "password": password });
    let (status, text) = send(app, json_request("POST", "/auth/industry/login", None, body)).await;
    assert_eq!(status, StatusCode::OK);
    parse(&text)["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _) = test_app();
    let (status, body) = send(&app, empty_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "ok");
}

#[tokio::test]
async fn register_twice_conflicts() {
    let (app, store) = test_app();
    let body = serde_json::json!({ "email": "a@x.com", "password": "p", "companyName": "ACME" });

    let (status, text) = send(&app, json_request("POST", "/auth/industry/register", None, body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Industry registered successfully");

    let (status, text) = send(&app, json_request("POST", "/auth/industry/register", None, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Email already registered");

    assert_eq!(store.account_count().await, 1);
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let (app, store) = test_app();
    let body = serde_json::json!({ "email": "not-an-email", "password": "p", "companyName": "ACME" });
    let (status, _) = send(&app, json_request("POST", "/auth/industry/register", None, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.account_count().await, 0);
}

#[tokio::test]
async fn register_rejects_blank_company_name() {
    let (app, store) = test_app();
    let body = serde_json::json!({ "email": "a@x.com", "password": "p", "companyName": "   " });
    let (status, text) = send(&app, json_request("POST", "/auth/industry/register", None, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Company name is required");
    assert_eq!(store.account_count().await, 0);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, _) = test_app();
    register_and_login(&app, "a@x.com", "p").await;

    let body = serde_json::json!({ "email": "a@x.com", "password": "wrong" });
    let (status, text) = send(&app, json_request("POST", "/auth/industry/login", None, body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(text, "Incorrect password");
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let (app, _) = test_app();
    let body = serde_json::json!({ "email": "a@x.com", "password": "p", "companyName": "ACME" });
    send(&app, json_request("POST", "/auth/industry/register", None, body)).await;

    let body = serde_json::json!({ "email": "a@x.com", "password": "p" });
    let (status, text) = send(&app, json_request("POST", "/auth/industry/login", None, body)).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&text);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["user"]["email"], "a@x.com");
    assert_eq!(json["user"]["name"], "ACME");
    assert_eq!(json["user"]["userType"], "INDUSTRY");
    assert!(json["user"].get("passwordHash").is_none());

    let claims = tokens().decode(json["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, "a@x.com");
}

#[tokio::test]
async fn login_rejects_non_industry_account() {
    let (app, store) = test_app();
    store
        .account_create(NewAccount {
            name: Some("Student".to_string()),
            email: "s@x.com".to_string(),
            password_hash: AuthAppService::hash_password("p").unwrap(),
            user_type: UserType::Applicant,
            picture_url: None,
        })
        .await
        .unwrap();

    let body = serde_json::json!({ "email": "s@x.com", "password": "p" });
    let (status, text) = send(&app, json_request("POST", "/auth/industry/login", None, body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(text, "Account is not an industry account");
}

#[tokio::test]
async fn me_reflects_token_claims() {
    let (app, _) = test_app();
    let token = tokens().issue("ghost@x.com", "user-7", UserType::Industry).unwrap();

    let (status, text) = send(&app, empty_request("GET", "/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&text);
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["email"], "ghost@x.com");
    assert_eq!(json["userType"], "INDUSTRY");
    assert!(json.get("name").is_none());
}

#[tokio::test]
async fn me_uses_stored_profile() {
    let (app, _) = test_app();
    let token = register_and_login(&app, "a@x.com", "p").await;

    let (status, text) = send(&app, empty_request("GET", "/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&text);
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["name"], "ACME");
    assert_eq!(json["picture"], "");
}

#[tokio::test]
async fn bad_tokens_are_treated_as_no_token() {
    let (app, _) = test_app();
    let expired = TokenCodec::with_ttl(SECRET, Duration::hours(-2))
        .issue("a@x.com", "1", UserType::Industry)
        .unwrap();
    let just_expired = TokenCodec::with_ttl(SECRET, Duration::seconds(-5))
        .issue("ghost@x.com", "1", UserType::Industry)
        .unwrap();
    let foreign = TokenCodec::new("some-other-secret-that-is-long-enough", 1)
        .issue("a@x.com", "1", UserType::Industry)
        .unwrap();

    let (baseline_status, baseline_body) = send(&app, empty_request("GET", "/auth/me", None)).await;
    assert_eq!(baseline_status, StatusCode::UNAUTHORIZED);

    for token in [
        expired.as_str(),
        just_expired.as_str(),
        foreign.as_str(),
        "garbage",
    ] {
        let (status, body) = send(&app, empty_request("GET", "/auth/me", Some(token))).await;
        assert_eq!(status, baseline_status);
        assert_eq!(body, baseline_body);

        // Public routes still work with a bad token attached.
        let (status, _) = send(&app, empty_request("GET", "/hackathons", Some(token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn public_paths_reach_handlers_without_token() {
    let (app, _) = test_app();
    for (path, expected) in [
        ("/health", StatusCode::OK),
        ("/test", StatusCode::OK),
        ("/jobs", StatusCode::OK),
        ("/hackathons", StatusCode::OK),
        ("/error", StatusCode::INTERNAL_SERVER_ERROR),
        ("/", StatusCode::OK),
        ("/index.html", StatusCode::OK),
        ("/static/index.html", StatusCode::OK),
    ] {
        let (status, _) = send(&app, empty_request("GET", path, None)).await;
        assert_eq!(status, expected, "{}", path);
    }

    // Reaches the login handler, which answers with its own 401 text.
    let body = serde_json::json!({ "email": "nobody@x.com", "password": "p" });
    let (status, text) = send(&app, json_request("POST", "/auth/industry/login", None, body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(text, "Invalid email");
}

#[tokio::test]
async fn protected_paths_reject_anonymous_before_handler() {
    let (app, _) = test_app();
    let id = uuid::Uuid::new_v4();
    let body = serde_json::json!({ "title": "Jam" });
    let requests = vec![
        json_request("POST", "/hackathons", None, body.clone()),
        json_request("PUT", &format!("/hackathons/{}", id), None, body.clone()),
        json_request("POST", "/jobs", None, body),
        empty_request("DELETE", &format!("/jobs/{}", id), None),
        empty_request("PATCH", &format!("/jobs/{}/toggle-status", id), None),
        empty_request("GET", "/auth/me", None),
        empty_request("GET", "/unknown", None),
    ];
    for req in requests {
        let uri = req.uri().clone();
        let (status, text) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(parse(&text)["error"], "Authentication required", "{}", uri);
    }

    let (_, text) = send(&app, empty_request("GET", "/hackathons", None)).await;
    assert_eq!(parse(&text), serde_json::json!([]));
}

#[tokio::test]
async fn my_listings_need_identity_even_under_public_prefix() {
    let (app, _) = test_app();
    let (status, _) = send(&app, empty_request("GET", "/jobs/my", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn hackathon_lifecycle() {
    let (app, _) = test_app();
    let owner = register_and_login(&app, "a@x.com", "p").await;
    let rival = register_and_login(&app, "b@x.com", "p").await;

    let payload = serde_json::json!({
        "title": "Rust Jam",
        "company": "ACME",
        "teamSize": 4,
        "mode": "Hybrid",
        "startDate": "2025-03-01",
        "endDate": "2025-03-03",
        "phases": "[{\"name\":\"Round 1\"}]"
    });
    let (status, text) = send(&app, json_request("POST", "/hackathons", Some(&owner), payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = parse(&text);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["enabled"], true);
    assert_eq!(created["teamSize"], 4);

    let (_, text) = send(&app, empty_request("GET", "/hackathons", None)).await;
    assert_eq!(parse(&text).as_array().unwrap().len(), 1);

    let (status, text) = send(&app, empty_request("GET", &format!("/hackathons/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&text)["views"], 1);

    let edit = serde_json::json!({ "title": "Hijacked" });
    let (status, _) = send(&app, json_request("PUT", &format!("/hackathons/{}", id), Some(&rival), edit)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let edit = serde_json::json!({ "title": "Rust Jam II", "startDate": "2025-04-01", "endDate": "2025-04-02" });
    let (status, text) = send(&app, json_request("PUT", &format!("/hackathons/{}", id), Some(&owner), edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&text)["title"], "Rust Jam II");

    let (status, text) = send(&app, empty_request("DELETE", &format!("/hackathons/{}", id), Some(&owner))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&text)["ok"], true);

    let (_, text) = send(&app, empty_request("GET", "/hackathons", None)).await;
    assert_eq!(parse(&text), serde_json::json!([]));
    let (status, _) = send(&app, empty_request("GET", &format!("/hackathons/{}", id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, text) = send(&app, empty_request("GET", "/hackathons/my", Some(&owner))).await;
    let mine = parse(&text);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["enabled"], false);

    let (status, text) = send(&app, empty_request("PATCH", &format!("/hackathons/{}/toggle-status", id), Some(&owner))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&text)["enabled"], true);
}

#[tokio::test]
async fn applicants_cannot_post_jobs() {
    let (app, _) = test_app();
    let token = tokens().issue("s@x.com", "student-1", UserType::Applicant).unwrap();
    let body = serde_json::json!({ "title": "Intern", "company": "ACME" });
    let (status, _) = send(&app, json_request("POST", "/jobs", Some(&token), body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn draft_job_is_private_until_enabled() {
    let (app, _) = test_app();
    let owner = register_and_login(&app, "a@x.com", "p").await;
    let body = serde_json::json!({ "title": "Backend engineer", "company": "ACME", "jobType": "FullTime", "enabled": false });
    let (status, text) = send(&app, json_request("POST", "/jobs", Some(&owner), body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = parse(&text)["id"].as_str().unwrap().to_string();

    let (_, text) = send(&app, empty_request("GET", "/jobs", None)).await;
    assert_eq!(parse(&text), serde_json::json!([]));
    let (status, _) = send(&app, empty_request("GET", &format!("/jobs/{}", id), Some(&owner))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_with_credentials() {
    let (app, _) = test_app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/hackathons")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
}

#[tokio::test]
async fn postgres_register_and_login() {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip postgres test: set TEST_DATABASE_URL");
            return;
        }
    };
    let pool = match db::create_pool(&database_url).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Skip postgres test: {}", e);
            return;
        }
    };
    db::ensure_schema(&pool).await.unwrap();
    let app = create_app(AppState::new(Arc::new(PgStore::new(pool)), tokens()));

    let email = format!(
        "test-{}@example.com",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );
    let token = register_and_login(&app, &email, "password123").await;

    let body = serde_json::json!({ "email": email, "password": "password123", "companyName": "ACME" });
    let (status, text) = send(&app, json_request("POST", "/auth/industry/register", None, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Email already registered");

    let body = serde_json::json!({ "title": "Rust Jam" });
    let (status, _) = send(&app, json_request("POST", "/hackathons", Some(&token), body)).await;
    assert_eq!(status, StatusCode::CREATED);
}
