use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::{AuthAttempt, CallbackOutcome};

/// OAuth redirect handler.
///
/// Records exactly one outcome on the shared attempt: the authorization code
/// when the redirect carries a `code` and its `state` matches the nonce of
/// the current attempt, or a failure reason otherwise. The response body is
/// a minimal HTML page so the browser transaction completes cleanly.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthAttempt>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(attempt) = state.as_mut() else {
        return Html("<h4>No authorization attempt in progress.</h4>");
    };

    if attempt.outcome.is_some() {
        return Html("<h4>This authorization attempt has already completed.</h4>");
    }

    if let Some(err) = params.get("error") {
        attempt.outcome = Some(CallbackOutcome::Failed(format!(
            "authorization denied: {}",
            err
        )));
        return Html("<h4>Authorization was denied.</h4>");
    }

    // The state nonce must round-trip unchanged before any code is accepted.
    match params.get("state") {
        Some(returned) if *returned == attempt.state => {}
        _ => {
            attempt.outcome = Some(CallbackOutcome::Failed(
                "state parameter missing or does not match this attempt".to_string(),
            ));
            return Html("<h4>State mismatch. Rejecting authorization code.</h4>");
        }
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => {
            attempt.outcome = Some(CallbackOutcome::Code(code.clone()));
            Html("<h2>Authentication successful.</h2><p>You can close this tab now.</p>")
        }
        _ => {
            attempt.outcome = Some(CallbackOutcome::Failed(
                "redirect did not include an authorization code".to_string(),
            ));
            Html("<h4>Missing authorization code.</h4>")
        }
    }
}
