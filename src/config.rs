//! Configuration management for the Spotify playback remote.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file in the platform-local data
//! directory. The `.env` file doubles as the credentials artifact: on first
//! run a template is written there and the process exits so the user can fill
//! in their Spotify application credentials.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults for the Spotify endpoints

use std::{env, path::PathBuf};

use crate::{error, types::Credentials};

const ENV_TEMPLATE: &str = "\
# Spotify application credentials.
# Create an application at https://developer.spotify.com/dashboard and add
# the redirect URI configured below to its settings.
SPOTIFY_CLIENT_ID=
SPOTIFY_CLIENT_SECRET=
";

/// Returns the application's directory inside the local data directory.
///
/// - Linux: `~/.local/share/spotctl`
/// - macOS: `~/Library/Application Support/spotctl`
/// - Windows: `%LOCALAPPDATA%/spotctl`
pub fn config_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotctl");
    path
}

fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}

/// Loads environment variables from the `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist. If the
/// `.env` file itself is missing, a placeholder template with empty credential
/// fields is written and the process terminates with a non-zero exit status:
/// the user is expected to fill in the template and run the command again.
/// This is deliberate first-run behavior, not a recoverable error.
///
/// Variables that are already set in the process environment take precedence
/// over values in the file.
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded, or an
/// error string if directory creation or file loading fails.
///
/// # Example
///
/// ```
/// use spotctl::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        async_fs::write(&path, ENV_TEMPLATE)
            .await
            .map_err(|e| e.to_string())?;
        error!(
            "Created {}. Fill in your Spotify credentials and run again.",
            path.display()
        );
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the Spotify application credentials.
///
/// Reads `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET`. Missing or empty
/// values are a fatal configuration error: the process terminates with a
/// message pointing at the credentials file. Credentials are loaded once and
/// never mutated for the lifetime of the process.
pub fn credentials() -> Credentials {
    let client_id = env::var("SPOTIFY_CLIENT_ID").unwrap_or_default();
    let client_secret = env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default();

    if client_id.is_empty() || client_secret.is_empty() {
        error!(
            "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set. Edit {} or export them.",
            env_file_path().display()
        );
    }

    Credentials {
        client_id,
        client_secret,
    }
}

/// Returns the Spotify Web API base URL.
pub fn api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify OAuth authorization URL.
///
/// This is where users are redirected to grant permissions to the
/// application.
pub fn authorize_url() -> String {
    env::var("SPOTIFY_AUTHORIZE_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Used for exchanging authorization codes for access tokens in the final
/// step of authentication.
pub fn token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the OAuth redirect URI.
///
/// Must match a redirect URI registered in the Spotify application settings,
/// and must point at the local callback server (see [`server_addr`]).
pub fn redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI")
        .unwrap_or_else(|_| "http://127.0.0.1:8888/callback".to_string())
}

/// Returns the bind address for the local OAuth callback server.
///
/// Host and port must agree with [`redirect_uri`].
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the OAuth scope requested during authorization.
///
/// The default covers reading and modifying playback state, which is what
/// the playback commands need.
pub fn scope() -> String {
    env::var("SPOTIFY_AUTH_SCOPE")
        .unwrap_or_else(|_| "user-modify-playback-state user-read-playback-state".to_string())
}

/// Returns how long the interactive flow waits for the OAuth redirect,
/// in seconds. Defaults to 300.
pub fn auth_timeout_secs() -> u64 {
    env::var("AUTH_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(300)
}
