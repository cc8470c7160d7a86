use std::process::Command;

/// Checks whether the configured player binary responds. A missing player is
/// a recoverable condition: the TUI still runs, the play action is replaced
/// by an informational message.
pub fn player_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Install hint shown when the player binary is absent.
pub fn install_hint(program: &str) -> String {
    if program == "mpv" {
        if cfg!(target_os = "macos") {
            "mpv not found. Install it with 'brew install mpv'.".to_string()
        } else if cfg!(target_os = "windows") {
            "mpv not found. Install it with 'winget install mpv'.".to_string()
        } else {
            "mpv not found. Install it with your package manager (e.g. 'sudo apt install mpv').".to_string()
        }
    } else {
        format!("'{}' not found in PATH. Install it or change player_command in the config.", program)
    }
}
