use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Marker present in the status block while something is playing.
const PLAYING_MARKER: &str = "PLAY";
/// Prefix of the status line naming the current file.
const FILE_PREFIX: &str = "File: ";

/// What the external player reports when asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Playback is active on the given file.
    Playing(PathBuf),
    /// No playing marker: playback has ended (or was stopped).
    Stopped,
}

/// Runs the player's status query.
pub struct StatusPoller {
    program: String,
}

impl StatusPoller {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    /// Query the player. An error here means "skip this poll cycle and
    /// retry on the next one", never "playback ended".
    pub fn query(&self) -> Result<PlayerStatus> {
        let output = Command::new(&self.program)
            .arg("--info")
            .output()
            .with_context(|| format!("failed to run {} --info", self.program))?;
        if !output.status.success() {
            bail!("{} --info exited with {}", self.program, output.status);
        }
        Ok(parse_status(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse a status block: the playing marker plus a `File: ` line yield
/// the current path; anything else means playback has ended.
pub fn parse_status(text: &str) -> PlayerStatus {
    if text.contains(PLAYING_MARKER) {
        if let Some(line) = text.lines().find_map(|l| l.strip_prefix(FILE_PREFIX)) {
            return PlayerStatus::Playing(PathBuf::from(line.trim()));
        }
    }
    PlayerStatus::Stopped
}
