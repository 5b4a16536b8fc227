use crate::{
    error, info,
    spotify::{auth::AuthFlow, player},
    success,
    types::{PlaybackState, Session},
    utils, warning,
};

async fn authenticated_session() -> Session {
    let flow = AuthFlow::from_env();
    match flow.authenticate().await {
        Ok(session) => session,
        Err(e) => error!("Not authenticated: {}. Run spotctl auth.", e),
    }
}

pub async fn play() {
    let session = authenticated_session().await;
    match player::play(&session).await {
        Ok(()) => success!("Playback resumed."),
        Err(e) => warning!("Failed to start playback: {}", e),
    }
}

pub async fn pause() {
    let session = authenticated_session().await;
    match player::pause(&session).await {
        Ok(()) => success!("Playback paused."),
        Err(e) => warning!("Failed to pause playback: {}", e),
    }
}

pub async fn next() {
    let session = authenticated_session().await;
    match player::next(&session).await {
        Ok(()) => success!("Skipped to next track."),
        Err(e) => warning!("Failed to skip to next track: {}", e),
    }
}

pub async fn previous() {
    let session = authenticated_session().await;
    match player::previous(&session).await {
        Ok(()) => success!("Returned to previous track."),
        Err(e) => warning!("Failed to return to previous track: {}", e),
    }
}

pub async fn status() {
    let session = authenticated_session().await;
    match player::current_playback(&session).await {
        Ok(Some(state)) => print_playback(&state),
        Ok(None) => info!("Nothing is playing right now."),
        Err(e) => warning!("Failed to get current playback: {}", e),
    }
}

fn print_playback(state: &PlaybackState) {
    let verb = if state.is_playing { "Playing" } else { "Paused" };

    match &state.item {
        Some(track) => {
            let artists = track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            info!("{}: {} - {}", verb, artists, track.name);

            if let (Some(progress), Some(duration)) = (state.progress_ms, track.duration_ms) {
                info!(
                    "Position: {} / {}",
                    utils::format_track_time(progress),
                    utils::format_track_time(duration)
                );
            }
        }
        None => info!("{}: unknown track", verb),
    }

    if let Some(device) = &state.device {
        match device.volume_percent {
            Some(volume) => info!("Device: {} (volume {}%)", device.name, volume),
            None => info!("Device: {}", device.name),
        }
    }
}
