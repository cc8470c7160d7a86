use std::{io, time::Duration};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use fancast_lib::api::FeedClient;
use fancast_lib::app::{App, AsyncAction};
use fancast_lib::config::AppConfig;
use fancast_lib::handlers::async_actions;
use fancast_lib::handlers::input::{self, InputResult};
use fancast_lib::player::Player;
use fancast_lib::{setup, ui};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Optional direct play URL (if provided, plays and exits)
    #[arg(short, long)]
    play: Option<String>,

    /// Override the feed URL for this run
    #[arg(long)]
    feed: Option<String>,

    /// Check configuration, player, and feed reachability, then exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    env_logger::init();
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(feed) = args.feed {
        config.feed_url = feed;
    }

    // -- CLI MODES --
    if args.check {
        println!("Feed URL: {}", config.feed_url);
        let available = setup::player_available(&config.player_command);
        println!(
            "Player '{}': {}",
            config.player_command,
            if available { "found" } else { "NOT FOUND" }
        );
        let client = FeedClient::new(config.feed_url.clone());
        match client.fetch_snapshot(config.feed_tz()).await {
            Ok(snapshot) => println!(
                "Feed OK: {} matches, last updated {}",
                snapshot.matches.len(),
                snapshot.last_updated_at.to_rfc3339()
            ),
            Err(e) => println!("Feed check FAILED: {}", e),
        }
        return Ok(());
    }

    if let Some(url) = args.play {
        if !setup::player_available(&config.player_command) {
            anyhow::bail!(setup::install_hint(&config.player_command));
        }
        let player = Player::with_program(&config.player_command, config.autoplay_muted);
        println!("Playing: {}", url);
        player.play(&url)?;
        if !player.wait_for_playback(8000).await? {
            anyhow::bail!("Playback did not start. The stream may be offline.");
        }
        return Ok(());
    }

    // -- TUI MODE (Default) --
    let player_available = setup::player_available(&config.player_command);
    if !player_available {
        log::warn!("{}", setup::install_hint(&config.player_command));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let player = Player::with_program(&config.player_command, config.autoplay_muted);
    let mut app = App::new(config, player_available);
    let (tx, mut rx) = mpsc::channel::<AsyncAction>(32);

    // Initial load; 'r' re-fetches, there is no automatic retry
    async_actions::spawn_fetch(&mut app, &tx);

    let res = run_app(&mut terminal, &mut app, &player, tx, &mut rx).await;

    // Restore terminal, releasing the player first
    player.stop();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    player: &Player,
    tx: mpsc::Sender<AsyncAction>,
    rx: &mut mpsc::Receiver<AsyncAction>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Drain async results without blocking the draw loop
        while let Ok(action) = rx.try_recv() {
            async_actions::handle_async_action(app, action);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match input::handle_key_event(app, key, &tx, player)? {
                    InputResult::Quit => return Ok(()),
                    InputResult::Continue => {}
                }
            }
        }

        app.loading_tick = app.loading_tick.wrapping_add(1);
    }
}
