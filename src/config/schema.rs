use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/jukewheel/config.toml` or `~/.config/jukewheel/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `JUKEWHEEL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub library: LibrarySettings,
    pub timing: TimingSettings,
    pub ranking: RankingSettings,
    pub input: InputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            library: LibrarySettings::default(),
            timing: TimingSettings::default(),
            ranking: RankingSettings::default(),
            input: InputSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// The external player binary. Everything the controller does goes
    /// through this program's command-line protocol.
    pub program: String,
    /// Start the player's background server once at startup.
    pub start_server: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            program: "mocp".to_string(),
            start_server: true,
        }
    }
}

/// Which directories are eligible to become albums.
///
/// Exactly one policy is active per deployment; there is no hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncludePolicy {
    /// Any directory under the root that holds audio files is an album.
    Everything,
    /// Only directories carrying a marker file (or below one) are albums.
    Marker,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Audio file extensions that count toward album detection.
    pub extensions: Vec<String>,
    /// Image extensions accepted as loose cover files.
    pub cover_extensions: Vec<String>,
    /// Album inclusion policy, see [`IncludePolicy`].
    pub include: IncludePolicy,
    /// Marker file name for the `marker` policy.
    pub marker_name: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["flac".into(), "ogg".into(), "mp3".into()],
            cover_extensions: vec![
                "gif".into(),
                "png".into(),
                "jpg".into(),
                "jpeg".into(),
                "bmp".into(),
            ],
            include: IncludePolicy::Everything,
            marker_name: ".jukewheel".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Interval between status polls / idle ticks (milliseconds).
    pub poll_interval_ms: u64,
    /// Minimum idle time between library rescans (seconds).
    pub rescan_interval_secs: u64,
    /// How long status-driven transitions stay suppressed after a manual
    /// command (seconds).
    pub cooldown_secs: u64,
    /// Inactivity in `Idle` before the kiosk goes to sleep (seconds).
    /// Only honored on hardware deployments with power pins.
    pub sleep_timeout_secs: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            rescan_interval_secs: 300,
            cooldown_secs: 20,
            sleep_timeout_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Per-completion multiplier applied to every album's play weight.
    /// Plays in the past count less than recent plays.
    pub decay: f64,
    /// Albums added within this many days sort ahead of everything else.
    pub recent_days: u64,
}

impl RankingSettings {
    /// The recency window in seconds.
    pub fn recent_window_secs(&self) -> u64 {
        self.recent_days * 24 * 3600
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            decay: 0.95,
            recent_days: 30,
        }
    }
}

/// Where manual input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputBackend {
    /// Terminal keys: arrows jog, space is the button, q quits.
    Keys,
    /// Rotary knob and button wired to digital pins.
    Gpio,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub backend: InputBackend,
    /// Rotary code pins, least significant bit first.
    pub rotary_pins: Vec<u8>,
    pub button_pin: u8,
    /// Auxiliary power switch pins toggled on sleep/wake.
    pub power_pins: Vec<u8>,
    /// Pin sampling cadence (milliseconds).
    pub sample_interval_ms: u64,
    /// Minimum interval between reported button presses (milliseconds).
    pub debounce_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            backend: InputBackend::Keys,
            rotary_pins: vec![17, 27, 22, 23],
            button_pin: 24,
            power_pins: vec![5, 6],
            sample_interval_ms: 2,
            debounce_ms: 5,
        }
    }
}
