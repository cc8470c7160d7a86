use std::process::{Child, Command};
use std::sync::{Arc, Mutex};

use log::{info, warn};

/// Lifecycle wrapper around the external player process. At most one
/// underlying instance exists at a time: `play` always tears the previous
/// process down (kill + reap) before spawning the next, and `stop` always
/// releases. Playback internals (buffering, ABR) belong to the player.
#[derive(Clone)]
pub struct Player {
    program: String,
    muted: bool,
    process: Arc<Mutex<Option<Child>>>,
}

impl Player {
    pub fn new() -> Self {
        Self::with_program("mpv", false)
    }

    /// `program` is normally "mpv"; tests and the config file can point it
    /// elsewhere. mpv-specific flags are only passed to mpv.
    pub fn with_program(program: &str, muted: bool) -> Self {
        Self {
            program: program.to_string(),
            muted,
            process: Arc::new(Mutex::new(None)),
        }
    }

    pub fn play(&self, url: &str) -> Result<(), anyhow::Error> {
        // Teardown-then-create: the old instance must be gone before the
        // replacement exists, even if the spawn below fails.
        self.stop();

        let mut cmd = Command::new(&self.program);
        cmd.arg(url);
        if self.program == "mpv" {
            cmd.arg("--fs")
                .arg("--force-window")
                .arg("--cache=yes")
                .arg("--demuxer-max-bytes=128MiB")
                .arg("--demuxer-max-back-bytes=32MiB")
                .arg("--msg-level=all=no")
                .arg("--term-status-msg=no")
                .arg("--hwdec=auto");
            // Autoplay is implicit in spawning mpv; mute is the only
            // advisory flag we forward.
            if self.muted {
                cmd.arg("--mute=yes");
            }
        }

        match cmd.spawn() {
            Ok(child) => {
                info!("started {} (pid {})", self.program, child.id());
                let mut guard = self
                    .process
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Failed to lock process mutex: {}", e))?;
                *guard = Some(child);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to start {}: {}. Make sure it is installed and in PATH.",
                self.program,
                e
            )),
        }
    }

    /// Check if the player process is still alive
    pub fn is_running(&self) -> bool {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(ref mut child) = *guard {
                // try_wait returns Ok(Some(status)) if exited, Ok(None) if still running
                match child.try_wait() {
                    Ok(Some(_)) => false,
                    Ok(None) => true,
                    Err(_) => false,
                }
            } else {
                false
            }
        } else {
            false // Mutex poisoned, assume not running
        }
    }

    /// Pid of the current instance, if one is held.
    pub fn current_pid(&self) -> Option<u32> {
        self.process
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|c| c.id()))
    }

    /// Wait for playback to come up by polling the process. Ok(true) once the
    /// process has survived its startup window, Ok(false) if it died (bad
    /// URL, geo-block, codec failure).
    pub async fn wait_for_playback(&self, timeout_ms: u64) -> Result<bool, anyhow::Error> {
        use tokio::time::{sleep, Duration, Instant};

        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        // Give the player a moment to initialize
        sleep(Duration::from_millis(500)).await;

        while start.elapsed() < timeout {
            if !self.is_running() {
                warn!("{} exited during startup", self.program);
                return Ok(false);
            }

            // Alive past the connect/buffer window counts as playing
            if start.elapsed() > Duration::from_millis(2000) {
                return Ok(true);
            }

            sleep(Duration::from_millis(200)).await;
        }

        Ok(self.is_running())
    }

    pub fn stop(&self) {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    // "sleep <url>" spawns a harmless long-lived process, standing in for
    // the real player so lifecycle ordering can be observed.

    #[test]
    fn test_play_then_stop_releases_instance() {
        let player = Player::with_program("sleep", false);
        player.play("30").unwrap();
        assert!(player.is_running());
        player.stop();
        assert!(!player.is_running());
        assert!(player.current_pid().is_none());
    }

    #[test]
    fn test_replay_tears_down_previous_instance_first() {
        let player = Player::with_program("sleep", false);

        player.play("30").unwrap();
        let first_pid = player.current_pid().unwrap();

        player.play("30").unwrap();
        let second_pid = player.current_pid().unwrap();

        assert_ne!(first_pid, second_pid);
        // The first process was killed AND reaped before the second spawned,
        // so not even a zombie entry remains.
        if Path::new("/proc").exists() {
            assert!(!Path::new(&format!("/proc/{}", first_pid)).exists());
        }

        player.stop();
    }

    #[test]
    fn test_stop_without_play_is_harmless() {
        let player = Player::with_program("sleep", false);
        player.stop();
        assert!(!player.is_running());
    }

    #[test]
    fn test_missing_program_is_an_error_not_a_panic() {
        let player = Player::with_program("definitely-not-a-player-binary", false);
        assert!(player.play("x").is_err());
        assert!(!player.is_running());
    }
}
