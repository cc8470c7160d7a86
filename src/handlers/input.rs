use std::io;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use tokio::sync::mpsc;

use super::async_actions::spawn_fetch;
use crate::app::{App, AsyncAction, Pane};
use crate::parser::Match;
use crate::player::Player;
use crate::session::is_watchable;

pub enum InputResult {
    Continue,
    Quit,
}

pub fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    tx: &mpsc::Sender<AsyncAction>,
    player: &Player,
) -> io::Result<InputResult> {
    // Only process key press events, not release (Windows sends both)
    if key.kind != KeyEventKind::Press {
        return Ok(InputResult::Continue);
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(InputResult::Quit);
    }

    // Help overlay swallows everything and closes on any key
    if app.show_help {
        app.show_help = false;
        return Ok(InputResult::Continue);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(InputResult::Quit),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('f') => app.cycle_status_filter(),
        KeyCode::Char('r') => spawn_fetch(app, tx),
        KeyCode::Char('s') => {
            player.stop();
            app.session.clear();
            app.now_playing = None;
            app.player_error = None;
        }
        KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.active_pane = match app.active_pane {
                Pane::Categories => Pane::Matches,
                Pane::Matches => Pane::Categories,
            };
        }
        KeyCode::Down | KeyCode::Char('j') => match app.active_pane {
            Pane::Categories => app.next_category(),
            Pane::Matches => app.next_match(),
        },
        KeyCode::Up | KeyCode::Char('k') => match app.active_pane {
            Pane::Categories => app.previous_category(),
            Pane::Matches => app.previous_match(),
        },
        KeyCode::Enter => match app.active_pane {
            // Category filters apply as the cursor moves; Enter just jumps
            // over to the match list
            Pane::Categories => app.active_pane = Pane::Matches,
            Pane::Matches => play_selected(app, tx, player),
        },
        _ => {}
    }

    Ok(InputResult::Continue)
}

fn play_selected(app: &mut App, tx: &mpsc::Sender<AsyncAction>, player: &Player) {
    let m: Arc<Match> = match app.selected_match() {
        Some(m) => m.clone(),
        None => return,
    };

    // Non-watchable matches render a countdown instead of a play action
    if !is_watchable(&m) {
        return;
    }

    if !app.player_available {
        app.player_error = Some(crate::setup::install_hint(&app.config.player_command));
        return;
    }

    app.session.select(m.clone());
    let url = app.session.current_stream_url();
    if url.is_empty() {
        return;
    }

    match player.play(&url) {
        Ok(()) => {
            app.player_error = None;
            app.now_playing = Some(m.display_title().to_string());

            let player = player.clone();
            let tx = tx.clone();
            let title = m.display_title().to_string();
            tokio::spawn(async move {
                match player.wait_for_playback(8000).await {
                    Ok(true) => {
                        let _ = tx.send(AsyncAction::PlayerStarted(title)).await;
                    }
                    Ok(false) => {
                        let _ = tx
                            .send(AsyncAction::PlayerFailed(
                                "Player exited before playback started. The stream may be offline or geo-blocked.".to_string(),
                            ))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx.send(AsyncAction::PlayerFailed(e.to_string())).await;
                    }
                }
            });
        }
        Err(e) => {
            warn!("player spawn failed: {}", e);
            app.player_error = Some(e.to_string());
            app.session.clear();
            app.now_playing = None;
        }
    }
}
