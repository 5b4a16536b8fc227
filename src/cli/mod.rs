//! # CLI Module
//!
//! User-facing command implementations for the playback remote. Each command
//! authenticates (taking the cached-token fast path whenever possible) and
//! then performs one operation against the Spotify Web API.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth authorization code flow and caches the token
//! - [`play`] / [`pause`] - Toggle playback on the active device
//! - [`next`] / [`previous`] - Skip between tracks
//! - [`status`] - Show what is currently playing
//!
//! ## Error Presentation
//!
//! This layer is where result values become console output. Authentication
//! failures are fatal for the invoked command (the process exits non-zero);
//! playback failures are reported as warnings and leave the process
//! otherwise unaffected, since a failed `play` against a sleeping device is
//! an everyday event and not a program error.

mod auth;
mod player;

pub use auth::auth;
pub use player::next;
pub use player::pause;
pub use player::play;
pub use player::previous;
pub use player::status;
