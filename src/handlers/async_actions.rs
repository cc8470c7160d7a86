use log::{error, info, warn};
use tokio::sync::mpsc;

use crate::api::FeedClient;
use crate::app::{App, AsyncAction};

/// Kicks off a background feed fetch. One outstanding request per trigger;
/// the generation counter lets a superseded fetch's result be ignored when
/// it finally lands.
pub fn spawn_fetch(app: &mut App, tx: &mpsc::Sender<AsyncAction>) {
    app.loading = true;
    app.fetch_generation += 1;
    let generation = app.fetch_generation;

    let client = FeedClient::new(app.config.feed_url.clone());
    let feed_tz = app.config.feed_tz();
    let tx = tx.clone();

    tokio::spawn(async move {
        match client.fetch_snapshot(feed_tz).await {
            Ok(snapshot) => {
                let _ = tx.send(AsyncAction::FeedLoaded(generation, snapshot)).await;
            }
            Err(e) => {
                let _ = tx
                    .send(AsyncAction::FeedFailed(generation, e.diagnostics()))
                    .await;
            }
        }
    });
}

pub fn handle_async_action(app: &mut App, action: AsyncAction) {
    match action {
        AsyncAction::FeedLoaded(generation, snapshot) => {
            if generation < app.fetch_generation {
                return; // a newer fetch is in flight
            }
            app.loading = false;
            info!("feed loaded: {} matches", snapshot.matches.len());
            app.apply_snapshot(snapshot);
        }
        AsyncAction::FeedFailed(generation, message) => {
            if generation < app.fetch_generation {
                return;
            }
            app.loading = false;
            if app.snapshot.is_none() {
                app.feed_error = Some(message);
            } else {
                // Keep showing the previous snapshot when a refresh fails
                warn!("feed refresh failed: {}", message.replace('\n', " "));
            }
        }
        AsyncAction::PlayerStarted(title) => {
            info!("playback confirmed: {}", title);
            app.player_error = None;
        }
        AsyncAction::PlayerFailed(message) => {
            error!("playback failed: {}", message);
            app.player_error = Some(message);
            app.now_playing = None;
            app.session.clear();
        }
    }
}
