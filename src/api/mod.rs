//! # API Module
//!
//! HTTP endpoints for the local callback server that backs the OAuth 2.0
//! authorization code flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles the OAuth redirect from Spotify's authorization
//!   server. Verifies the `state` nonce against the in-flight attempt and
//!   records the authorization code (or the failure) exactly once.
//! - [`health`] - Health check endpoint returning application status and
//!   version, useful to verify the listener is up.
//!
//! ## Architecture
//!
//! Built on [Axum](https://docs.rs/axum). The callback handler shares an
//! `Arc<Mutex<Option<AuthAttempt>>>` with the auth flow via an Axum
//! `Extension` layer: the flow seeds the attempt (with its `state` nonce)
//! before the browser is opened, and polls the same slot for the recorded
//! outcome afterwards.
//!
//! ## Security Considerations
//!
//! - The redirect's `state` query parameter must equal the nonce generated
//!   for the current attempt; any mismatch is recorded as a failure and the
//!   authorization code is discarded.
//! - Only the first request is honored per attempt. Later requests receive an
//!   explanatory page and change nothing.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
