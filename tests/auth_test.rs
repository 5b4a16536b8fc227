use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Extension, Router,
    extract::Query,
    http::StatusCode,
    routing::post,
};
use tokio::sync::Mutex;

use spotctl::{
    api,
    management::TokenStore,
    spotify::auth::{AuthError, AuthFlow, wait_for_callback},
    types::{AuthAttempt, CallbackOutcome, Credentials},
};

type Shared = Arc<Mutex<Option<AuthAttempt>>>;
type Hits = Arc<Mutex<Vec<(String, String)>>>;

fn test_credentials() -> Credentials {
    Credentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
    }
}

fn test_flow(base: &str, store: TokenStore) -> AuthFlow {
    AuthFlow {
        credentials: test_credentials(),
        api_url: base.to_string(),
        authorize_url: format!("{}/authorize", base),
        token_url: format!("{}/api/token", base),
        redirect_uri: "http://127.0.0.1:9/callback".to_string(),
        scope: "user-modify-playback-state user-read-playback-state".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        timeout_secs: 1,
        store,
    }
}

fn attempt_with_state(state: &str) -> Shared {
    Arc::new(Mutex::new(Some(AuthAttempt {
        state: state.to_string(),
        outcome: None,
    })))
}

async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A server that answers every request with the given status and records
/// method and path of everything it sees.
async fn spawn_recording_app(status: StatusCode) -> (String, Hits) {
    let hits: Hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&hits);

    let app = Router::new()
        .fallback(
            move |Extension(hits): Extension<Hits>, req: axum::extract::Request| async move {
                hits.lock()
                    .await
                    .push((req.method().to_string(), req.uri().path().to_string()));
                status
            },
        )
        .layer(Extension(recorded));

    (spawn_app(app).await, hits)
}

// --- callback handler ---

#[tokio::test]
async fn callback_records_code_when_state_matches() {
    let shared = attempt_with_state("abc123");
    let params = HashMap::from([
        ("state".to_string(), "abc123".to_string()),
        ("code".to_string(), "the-code".to_string()),
    ]);

    let response = api::callback(Query(params), Extension(Arc::clone(&shared))).await;
    assert!(response.0.contains("close this tab"));

    let outcome = shared.lock().await.as_ref().unwrap().outcome.clone();
    assert_eq!(outcome, Some(CallbackOutcome::Code("the-code".to_string())));
}

#[tokio::test]
async fn callback_rejects_state_mismatch() {
    let shared = attempt_with_state("expected");
    let params = HashMap::from([
        ("state".to_string(), "forged".to_string()),
        ("code".to_string(), "the-code".to_string()),
    ]);

    api::callback(Query(params), Extension(Arc::clone(&shared))).await;

    let outcome = shared.lock().await.as_ref().unwrap().outcome.clone();
    match outcome {
        Some(CallbackOutcome::Failed(reason)) => assert!(reason.contains("state")),
        other => panic!("expected failure outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn callback_rejects_missing_code() {
    let shared = attempt_with_state("abc123");
    let params = HashMap::from([("state".to_string(), "abc123".to_string())]);

    api::callback(Query(params), Extension(Arc::clone(&shared))).await;

    let outcome = shared.lock().await.as_ref().unwrap().outcome.clone();
    match outcome {
        Some(CallbackOutcome::Failed(reason)) => assert!(reason.contains("code")),
        other => panic!("expected failure outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn callback_records_provider_denial() {
    let shared = attempt_with_state("abc123");
    let params = HashMap::from([("error".to_string(), "access_denied".to_string())]);

    api::callback(Query(params), Extension(Arc::clone(&shared))).await;

    let outcome = shared.lock().await.as_ref().unwrap().outcome.clone();
    match outcome {
        Some(CallbackOutcome::Failed(reason)) => assert!(reason.contains("access_denied")),
        other => panic!("expected failure outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn callback_honors_only_the_first_request() {
    let shared = attempt_with_state("abc123");
    let first = HashMap::from([
        ("state".to_string(), "abc123".to_string()),
        ("code".to_string(), "first-code".to_string()),
    ]);
    let second = HashMap::from([
        ("state".to_string(), "abc123".to_string()),
        ("code".to_string(), "second-code".to_string()),
    ]);

    api::callback(Query(first), Extension(Arc::clone(&shared))).await;
    let response = api::callback(Query(second), Extension(Arc::clone(&shared))).await;
    assert!(response.0.contains("already completed"));

    let outcome = shared.lock().await.as_ref().unwrap().outcome.clone();
    assert_eq!(
        outcome,
        Some(CallbackOutcome::Code("first-code".to_string()))
    );
}

#[tokio::test]
async fn callback_without_attempt_changes_nothing() {
    let shared: Shared = Arc::new(Mutex::new(None));
    let params = HashMap::from([("code".to_string(), "the-code".to_string())]);

    let response = api::callback(Query(params), Extension(Arc::clone(&shared))).await;
    assert!(response.0.contains("No authorization attempt"));
    assert!(shared.lock().await.is_none());
}

// --- wait_for_callback ---

#[tokio::test]
async fn wait_for_callback_returns_recorded_outcome() {
    let shared = attempt_with_state("abc123");
    shared.lock().await.as_mut().unwrap().outcome =
        Some(CallbackOutcome::Code("the-code".to_string()));

    let outcome = wait_for_callback(shared, Duration::from_secs(5)).await;
    assert_eq!(outcome, Some(CallbackOutcome::Code("the-code".to_string())));
}

#[tokio::test]
async fn wait_for_callback_times_out_without_outcome() {
    let shared = attempt_with_state("abc123");
    let outcome = wait_for_callback(shared, Duration::from_millis(300)).await;
    assert_eq!(outcome, None);
}

// --- token store ---

#[tokio::test]
async fn token_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::at(dir.path().join("cache/token.txt"));

    assert_eq!(store.load_cached().await, None);

    store.persist("XYZ123").await.unwrap();
    assert_eq!(store.load_cached().await, Some("XYZ123".to_string()));

    // The artifact holds the bare token string, nothing else
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, "XYZ123");
}

#[tokio::test]
async fn token_store_trims_and_ignores_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.txt");

    std::fs::write(&path, "  XYZ123\n").unwrap();
    let store = TokenStore::at(path.clone());
    assert_eq!(store.load_cached().await, Some("XYZ123".to_string()));

    std::fs::write(&path, "\n  \n").unwrap();
    assert_eq!(store.load_cached().await, None);
}

// --- validity probe ---

#[tokio::test]
async fn probe_validity_accepts_any_success_status() {
    for status in [StatusCode::OK, StatusCode::NO_CONTENT, StatusCode::CREATED] {
        let (base, _) = spawn_recording_app(status).await;
        assert!(TokenStore::probe_validity("token", &base).await);
    }
}

#[tokio::test]
async fn probe_validity_rejects_non_success_status() {
    for status in [
        StatusCode::UNAUTHORIZED,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let (base, _) = spawn_recording_app(status).await;
        assert!(!TokenStore::probe_validity("token", &base).await);
    }
}

#[tokio::test]
async fn probe_validity_degrades_to_false_on_transport_failure() {
    assert!(!TokenStore::probe_validity("token", "http://127.0.0.1:1").await);
}

// --- authorize URL ---

#[test]
fn authorize_url_carries_required_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let mut flow = test_flow(
        "https://accounts.example",
        TokenStore::at(dir.path().join("token.txt")),
    );
    flow.redirect_uri = "http://127.0.0.1:8888/callback".to_string();

    let url = flow.build_authorize_url("nonce42");

    assert!(url.starts_with("https://accounts.example/authorize?"));
    assert!(url.contains("client_id=test-client"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains("scope=user-modify-playback-state%20user-read-playback-state"));
    assert!(url.contains("state=nonce42"));
}

// --- code exchange ---

#[tokio::test]
async fn exchange_code_returns_token_and_persists_exactly() {
    let captured: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let captured_clone = Arc::clone(&captured);

    let app = Router::new()
        .route(
            "/api/token",
            post(
                move |Extension(captured): Extension<Arc<Mutex<Option<String>>>>,
                      body: String| async move {
                    *captured.lock().await = Some(body);
                    (StatusCode::OK, r#"{"access_token":"XYZ123"}"#)
                },
            ),
        )
        .layer(Extension(captured_clone));
    let base = spawn_app(app).await;

    let dir = tempfile::tempdir().unwrap();
    let flow = test_flow(&base, TokenStore::at(dir.path().join("token.txt")));

    let token = flow.exchange_code("AQAB-code").await.unwrap();
    assert_eq!(token, "XYZ123");

    let body = captured.lock().await.clone().unwrap();
    assert!(body.contains("grant_type=authorization_code"));
    assert!(body.contains("code=AQAB-code"));
    assert!(body.contains("client_id=test-client"));
    assert!(body.contains("client_secret=test-secret"));

    flow.store.persist(&token).await.unwrap();
    let raw = std::fs::read_to_string(flow.store.path()).unwrap();
    assert_eq!(raw, "XYZ123");
}

#[tokio::test]
async fn exchange_code_surfaces_provider_error_body() {
    let app = Router::new().route(
        "/api/token",
        post(|| async { (StatusCode::BAD_REQUEST, r#"{"error":"invalid_grant"}"#) }),
    );
    let base = spawn_app(app).await;

    let dir = tempfile::tempdir().unwrap();
    let flow = test_flow(&base, TokenStore::at(dir.path().join("token.txt")));

    match flow.exchange_code("bad-code").await {
        Err(AuthError::ExchangeFailed(body)) => assert!(body.contains("invalid_grant")),
        other => panic!("expected exchange failure, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn exchange_code_rejects_response_without_access_token() {
    let app = Router::new().route(
        "/api/token",
        post(|| async { (StatusCode::OK, r#"{"token_type":"Bearer"}"#) }),
    );
    let base = spawn_app(app).await;

    let dir = tempfile::tempdir().unwrap();
    let flow = test_flow(&base, TokenStore::at(dir.path().join("token.txt")));

    match flow.exchange_code("some-code").await {
        Err(AuthError::ExchangeFailed(body)) => assert!(body.contains("access_token")),
        other => panic!("expected exchange failure, got {:?}", other.map(|_| ())),
    }
}

// --- full flow ---

#[tokio::test]
async fn valid_cached_token_short_circuits_the_interactive_flow() {
    let (base, hits) = spawn_recording_app(StatusCode::OK).await;

    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::at(dir.path().join("token.txt"));
    store.persist("CACHEDTOKEN").await.unwrap();

    let flow = test_flow(&base, store);
    let session = flow.authenticate().await.unwrap();
    assert_eq!(session.api_url(), base);

    // Exactly one validity probe, no authorize or token endpoint traffic
    let hits = hits.lock().await.clone();
    assert_eq!(hits, vec![("GET".to_string(), "/me".to_string())]);
}

#[tokio::test]
async fn denied_callback_aborts_without_persisting() {
    let (base, hits) = spawn_recording_app(StatusCode::UNAUTHORIZED).await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.txt");

    let mut flow = test_flow(&base, TokenStore::at(token_path.clone()));
    flow.server_addr = "127.0.0.1:18943".to_string();
    flow.redirect_uri = "http://127.0.0.1:18943/callback".to_string();
    flow.timeout_secs = 15;

    let handle = tokio::spawn(async move { flow.authenticate().await });

    // Wait for the callback listener to come up
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if let Ok(res) = client.get("http://127.0.0.1:18943/health").send().await {
            if res.status().is_success() {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let res = client
        .get("http://127.0.0.1:18943/callback?error=access_denied&state=whatever")
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    match handle.await.unwrap() {
        Err(AuthError::CodeMissing(reason)) => assert!(reason.contains("denied")),
        other => panic!("expected aborted flow, got {:?}", other.map(|_| ())),
    }

    // Nothing persisted, token endpoint never called
    assert_eq!(TokenStore::at(token_path).load_cached().await, None);
    let hits = hits.lock().await.clone();
    assert!(!hits.iter().any(|(_, path)| path == "/api/token"));
}

#[tokio::test]
async fn interactive_flow_times_out_without_redirect() {
    let (base, _) = spawn_recording_app(StatusCode::UNAUTHORIZED).await;

    let dir = tempfile::tempdir().unwrap();
    let mut flow = test_flow(&base, TokenStore::at(dir.path().join("token.txt")));
    flow.server_addr = "127.0.0.1:18944".to_string();
    flow.redirect_uri = "http://127.0.0.1:18944/callback".to_string();
    flow.timeout_secs = 1;

    match flow.authenticate().await {
        Err(AuthError::Timeout(secs)) => assert_eq!(secs, 1),
        other => panic!("expected timeout, got {:?}", other.map(|_| ())),
    }
}
