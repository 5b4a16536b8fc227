use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, info,
    management::TokenStore,
    server::start_callback_server,
    types::{AuthAttempt, CallbackOutcome, Credentials, Session},
    utils, warning,
};

/// Errors produced by the authentication flow.
///
/// Missing configuration is not represented here: the config layer treats it
/// as fatal and terminates the process before the flow starts.
#[derive(Debug)]
pub enum AuthError {
    /// The redirect arrived without a usable authorization code: the `code`
    /// parameter was absent or empty, the `state` nonce did not match, or the
    /// user denied the authorization request.
    CodeMissing(String),
    /// The token endpoint rejected the code exchange; carries the provider's
    /// response body.
    ExchangeFailed(String),
    /// No redirect arrived within the configured wait.
    Timeout(u64),
    /// Transport-level failure talking to the provider.
    Http(reqwest::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::CodeMissing(reason) => {
                write!(f, "no authorization code received: {}", reason)
            }
            AuthError::ExchangeFailed(body) => write!(f, "token exchange failed: {}", body),
            AuthError::Timeout(secs) => {
                write!(f, "no authorization redirect within {} seconds", secs)
            }
            AuthError::Http(e) => write!(f, "http error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Http(err)
    }
}

/// The full authentication sequence, from credentials to an authenticated
/// [`Session`].
///
/// All endpoints and the token store location are plain fields so the flow
/// can be pointed at a test double; [`AuthFlow::from_env`] wires up the real
/// configuration.
pub struct AuthFlow {
    pub credentials: Credentials,
    pub api_url: String,
    pub authorize_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_addr: String,
    pub timeout_secs: u64,
    pub store: TokenStore,
}

impl AuthFlow {
    /// Builds the flow from the application configuration.
    ///
    /// Terminates the process if the credentials are missing (see
    /// [`config::credentials`]).
    pub fn from_env() -> Self {
        AuthFlow {
            credentials: config::credentials(),
            api_url: config::api_url(),
            authorize_url: config::authorize_url(),
            token_url: config::token_url(),
            redirect_uri: config::redirect_uri(),
            scope: config::scope(),
            server_addr: config::server_addr(),
            timeout_secs: config::auth_timeout_secs(),
            store: TokenStore::new(),
        }
    }

    /// Runs the authentication sequence and returns an authenticated session.
    ///
    /// A cached token that passes the validity probe short-circuits the flow:
    /// no authorize URL is built, no listener is bound and no token endpoint
    /// traffic occurs. Otherwise the interactive exchange runs exactly once.
    /// The freshly obtained token is persisted best-effort; a cache write
    /// failure is reported but does not fail the authentication.
    pub async fn authenticate(&self) -> Result<Session, AuthError> {
        if let Some(cached) = self.store.load_cached().await {
            if TokenStore::probe_validity(&cached, &self.api_url).await {
                info!("Using cached access token.");
                return Ok(Session::new(cached, self.api_url.clone()));
            }
            warning!("Cached access token is invalid or expired.");
        }

        let token = self.interactive_exchange().await?;

        if let Err(e) = self.store.persist(&token).await {
            warning!("Failed to save token to cache: {}", e);
        }

        Ok(Session::new(token, self.api_url.clone()))
    }

    /// Constructs the authorize URL for one attempt.
    ///
    /// Carries `client_id`, `response_type=code`, the URL-encoded redirect
    /// URI, the playback scope and the attempt's `state` nonce.
    pub fn build_authorize_url(&self, state: &str) -> String {
        format!(
            "{authorize_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
            authorize_url = self.authorize_url,
            client_id = self.credentials.client_id,
            redirect_uri = urlencoding::encode(&self.redirect_uri),
            scope = urlencoding::encode(&self.scope),
            state = state,
        )
    }

    /// The browser/listener dance: authorize URL out, authorization code in,
    /// code exchanged for a token.
    async fn interactive_exchange(&self) -> Result<String, AuthError> {
        let state = utils::generate_state();
        let shared_state: Arc<Mutex<Option<AuthAttempt>>> =
            Arc::new(Mutex::new(Some(AuthAttempt {
                state: state.clone(),
                outcome: None,
            })));

        // Start the callback server before the browser can redirect back.
        let server_state = Arc::clone(&shared_state);
        let addr = self.server_addr.clone();
        tokio::spawn(async move {
            start_callback_server(addr, server_state).await;
        });

        let auth_url = self.build_authorize_url(&state);

        // Open the authorization URL in the default browser, fire-and-forget.
        if webbrowser::open(&auth_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            );
        }

        let outcome =
            wait_for_callback(shared_state, Duration::from_secs(self.timeout_secs)).await;

        match outcome {
            None => Err(AuthError::Timeout(self.timeout_secs)),
            Some(CallbackOutcome::Failed(reason)) => Err(AuthError::CodeMissing(reason)),
            Some(CallbackOutcome::Code(code)) => self.exchange_code(&code).await,
        }
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Form-encoded POST to the token endpoint with
    /// `grant_type=authorization_code`, the code, the redirect URI and the
    /// client credentials. A non-success response aborts the flow with the
    /// provider's error body; nothing is persisted on failure.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let client = Client::new();
        let res = client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(AuthError::ExchangeFailed(format!("{}: {}", status, body)));
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| AuthError::ExchangeFailed(format!("malformed token response: {}", e)))?;

        match json["access_token"].as_str() {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(AuthError::ExchangeFailed(format!(
                "token response has no access_token: {}",
                body
            ))),
        }
    }
}

/// Waits for the callback handler to record an outcome for the current
/// attempt.
///
/// Polls the shared state until an outcome appears or `max_wait` elapses,
/// showing a spinner while blocked. Returns `None` on timeout.
pub async fn wait_for_callback(
    shared_state: Arc<Mutex<Option<AuthAttempt>>>,
    max_wait: Duration,
) -> Option<CallbackOutcome> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in your browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(attempt) = lock.as_ref() {
            if let Some(outcome) = &attempt.outcome {
                let outcome = outcome.clone();
                drop(lock);
                pb.finish_and_clear();
                return Some(outcome);
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    pb.finish_and_clear();
    None
}
