use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// One in-flight authorization attempt, shared between the auth flow and the
/// callback handler. The `state` nonce is generated fresh per attempt and the
/// callback records exactly one outcome.
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    pub state: String,
    pub outcome: Option<CallbackOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Failed(String),
}

/// An authenticated API session: a client bound to the API base URL that
/// attaches the bearer token to every request. Created once per successful
/// authentication and shared read-only by all playback operations.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    api_url: String,
    token: String,
}

impl Session {
    pub fn new(token: String, api_url: String) -> Self {
        Session {
            client: Client::new(),
            api_url,
            token,
        }
    }

    /// Builds a request against `{api_url}/{path}` with the bearer token
    /// already attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), path);
        self.client.request(method, url).bearer_auth(&self.token)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub device: Option<Device>,
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}
