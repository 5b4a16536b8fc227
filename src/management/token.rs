use std::path::{Path, PathBuf};

use reqwest::Client;

/// On-disk cache for the access token.
///
/// The cache artifact holds exactly the plaintext token string, nothing else.
/// There is no expiry metadata: whether a cached token is still usable is
/// decided empirically with [`TokenStore::probe_validity`] on the next run.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore {
            path: Self::default_path(),
        }
    }

    /// A store rooted at an explicit path instead of the default cache
    /// location.
    pub fn at(path: PathBuf) -> Self {
        TokenStore { path }
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotctl/cache/token.txt");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached token, if any.
    ///
    /// An absent, unreadable or empty cache file is not an error, just "no
    /// cached token". Surrounding whitespace is trimmed.
    pub async fn load_cached(&self) -> Option<String> {
        let content = async_fs::read_to_string(&self.path).await.ok()?;
        let token = content.trim().to_string();
        if token.is_empty() { None } else { Some(token) }
    }

    /// Overwrites the cache artifact with the given token.
    ///
    /// Callers treat a failure here as best-effort: playback can proceed for
    /// the current process with the in-memory token.
    pub async fn persist(&self, token: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        async_fs::write(&self.path, token)
            .await
            .map_err(|e| e.to_string())
    }

    /// Checks whether a token is still accepted by the provider.
    ///
    /// Issues a lightweight authenticated GET against the current-user
    /// profile endpoint, which requires nothing beyond a valid bearer token.
    /// Any transport failure or non-2xx status degrades to `false`; this
    /// never surfaces an error to the caller.
    pub async fn probe_validity(token: &str, api_url: &str) -> bool {
        let url = format!("{}/me", api_url.trim_end_matches('/'));

        let client = Client::new();
        match client.get(&url).bearer_auth(token).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
