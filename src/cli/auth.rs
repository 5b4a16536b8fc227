use crate::{error, spotify::auth::AuthFlow, success};

pub async fn auth() {
    let flow = AuthFlow::from_env();
    match flow.authenticate().await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
