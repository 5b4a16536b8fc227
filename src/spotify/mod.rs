//! # Spotify Integration Module
//!
//! This module implements the Spotify Web API surface the application needs:
//! the OAuth 2.0 authorization code flow and the playback-control endpoints.
//! It is the only layer that talks to Spotify; the CLI layer above it deals
//! in [`Session`](crate::types::Session) values and result types.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (commands, output)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 authorization code)
//!     └── Player Operations (play, pause, next, previous, state)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! [`auth`] implements the authorization code flow for a confidential client:
//!
//! 1. **Cache First**: a previously persisted token is probed against the
//!    API and reused when still valid, skipping the interactive flow
//!    entirely.
//! 2. **Authorize Request**: otherwise the user's browser is pointed at the
//!    authorization endpoint, carrying a fresh random `state` nonce.
//! 3. **Local Callback**: a loopback HTTP server receives the redirect,
//!    verifies the `state` round-trip and captures the authorization code.
//! 4. **Token Exchange**: the code is exchanged for an access token with a
//!    form-encoded POST carrying the client credentials.
//! 5. **Persistence**: the token is written to the cache for future runs.
//!
//! The wait for the redirect is bounded by a configurable timeout instead of
//! blocking forever; a stuck browser flow surfaces as an error.
//!
//! ## Error Handling Philosophy
//!
//! Failures are explicit values, not console side effects. The auth flow
//! returns [`auth::AuthError`] and the player returns
//! [`player::PlayerError`], so callers can tell "nothing is playing" from
//! "the request failed" from "not authenticated". Only the CLI layer turns
//! these into user-facing messages, and only configuration problems
//! terminate the process.
//!
//! There is no retry logic: every playback operation issues exactly one HTTP
//! request, and a failed attempt is terminal for that operation.
//!
//! ## API Coverage
//!
//! - `GET /me` - token validity probe
//! - `GET /authorize`, `POST /api/token` - OAuth (accounts host)
//! - `PUT /me/player/play`, `PUT /me/player/pause` - playback toggle
//! - `POST /me/player/next`, `POST /me/player/previous` - track skipping
//! - `GET /me/player` - current playback state

pub mod auth;
pub mod player;
