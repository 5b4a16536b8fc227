use rand::{Rng, distr::Alphanumeric};

/// Generates a random opaque `state` nonce for one authorization attempt.
///
/// The nonce is embedded in the authorize URL and must be echoed back by the
/// provider on the redirect; the callback handler rejects any code whose
/// `state` does not match. 32 alphanumeric characters, fresh per call.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Formats a track position in milliseconds as `m:ss`.
pub fn format_track_time(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
