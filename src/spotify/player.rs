use std::fmt;

use reqwest::{Method, StatusCode};

use crate::types::{PlaybackState, Session};

/// Errors produced by playback operations.
///
/// These never terminate the process; the CLI layer reports them and moves
/// on.
#[derive(Debug)]
pub enum PlayerError {
    /// The API answered with a non-success status; carries status and body.
    Status { status: StatusCode, body: String },
    /// Transport-level failure, e.g. no connectivity.
    Http(reqwest::Error),
    /// The playback-state document could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "request failed with status {}", status)
                } else {
                    write!(f, "request failed with status {}: {}", status, body)
                }
            }
            PlayerError::Http(e) => write!(f, "http error: {}", e),
            PlayerError::Parse(e) => write!(f, "malformed playback state: {}", e),
        }
    }
}

impl std::error::Error for PlayerError {}

impl From<reqwest::Error> for PlayerError {
    fn from(err: reqwest::Error) -> Self {
        PlayerError::Http(err)
    }
}

/// Resumes or starts playback on the user's active device.
pub async fn play(session: &Session) -> Result<(), PlayerError> {
    command(session, Method::PUT, "me/player/play").await
}

/// Pauses playback on the user's active device.
pub async fn pause(session: &Session) -> Result<(), PlayerError> {
    command(session, Method::PUT, "me/player/pause").await
}

/// Skips to the next track in the queue.
pub async fn next(session: &Session) -> Result<(), PlayerError> {
    command(session, Method::POST, "me/player/next").await
}

/// Returns to the previous track.
pub async fn previous(session: &Session) -> Result<(), PlayerError> {
    command(session, Method::POST, "me/player/previous").await
}

/// Fetches the current playback state.
///
/// Returns `Ok(None)` when nothing is playing (the API answers 204 with an
/// empty body), which is distinct from a failed request.
pub async fn current_playback(session: &Session) -> Result<Option<PlaybackState>, PlayerError> {
    let res = session.request(Method::GET, "me/player").send().await?;
    let status = res.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(PlayerError::Status { status, body });
    }

    let body = res.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }

    let state: PlaybackState = serde_json::from_str(&body).map_err(PlayerError::Parse)?;
    Ok(Some(state))
}

/// Issues a single playback command; exactly one HTTP request, no retries.
async fn command(session: &Session, method: Method, path: &str) -> Result<(), PlayerError> {
    let res = session.request(method, path).send().await?;
    let status = res.status();

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(PlayerError::Status { status, body });
    }

    Ok(())
}
