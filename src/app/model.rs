//! The playback controller: a small state machine over the album
//! catalog, fed by one event channel and talking to the player through
//! the command queue.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::{LibrarySettings, Settings};
use crate::library::{Album, Catalog, rank, scan, unix_now};
use crate::player::{PlayerCmd, PlayerLink, PlayerStatus};
use crate::render::{Screen, ScreenView};

/// Controller state. `Asleep` only occurs on hardware deployments with
/// auxiliary power switching.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayState {
    Asleep,
    Idle,
    Playing,
    Paused,
}

/// Snapshot shared with the poll thread: whether a status query is
/// worth making this cycle.
#[derive(Debug, Default)]
pub struct PollView {
    pub playing: bool,
}

pub type PollHandle = Arc<Mutex<PollView>>;

/// The main application model.
///
/// All transitions run on the single event-loop thread; nothing here
/// needs locking beyond the published [`PollView`] snapshot.
pub struct App {
    catalog: Catalog,
    root: PathBuf,

    pub state: PlayState,
    /// Index of the selected album in the ranked catalog.
    pub selected: usize,
    /// 1-based track counter; 0 when nothing is playing.
    pub tracknum: u32,

    chill_until: Instant,
    idle_since: Instant,
    last_scan: Instant,

    player: PlayerLink,
    screen: Box<dyn Screen>,
    poll_view: PollHandle,

    cooldown: Duration,
    rescan_interval: Duration,
    decay: f64,
    recent_window_secs: u64,
}

impl App {
    /// Build the controller around an already-scanned catalog. Starts
    /// `Idle` with album 0 selected and its cover rendered.
    pub fn new(
        root: PathBuf,
        catalog: Catalog,
        player: PlayerLink,
        screen: Box<dyn Screen>,
        settings: &Settings,
    ) -> Self {
        let now = Instant::now();
        let mut app = Self {
            catalog,
            root,
            state: PlayState::Idle,
            selected: 0,
            tracknum: 0,
            chill_until: now,
            idle_since: now,
            last_scan: now,
            player,
            screen,
            poll_view: Arc::new(Mutex::new(PollView::default())),
            cooldown: Duration::from_secs(settings.timing.cooldown_secs),
            rescan_interval: Duration::from_secs(settings.timing.rescan_interval_secs),
            decay: settings.ranking.decay,
            recent_window_secs: settings.ranking.recent_window_secs(),
        };
        app.render();
        app
    }

    /// Handle the poll thread reads to decide whether to query status.
    pub fn poll_handle(&self) -> PollHandle {
        self.poll_view.clone()
    }

    pub fn albums(&self) -> &[Album] {
        &self.catalog.albums
    }

    /// When the controller last entered `Idle`; the sleep timeout counts
    /// from here.
    pub fn idle_since(&self) -> Instant {
        self.idle_since
    }

    fn current_album(&self) -> Option<&Album> {
        self.catalog.albums.get(self.selected)
    }

    fn render(&mut self) {
        let Some(album) = self.catalog.albums.get(self.selected) else {
            return;
        };
        let view = ScreenView {
            cover: &album.cover,
            state: self.state,
            tracknum: self.tracknum,
        };
        self.screen.render(&view);
    }

    fn publish_poll_view(&self) {
        if let Ok(mut view) = self.poll_view.lock() {
            view.playing = self.state == PlayState::Playing;
        }
    }

    fn set_state(&mut self, state: PlayState) {
        if state == PlayState::Idle && self.state != PlayState::Idle {
            self.idle_since = Instant::now();
        }
        self.state = state;
        self.publish_poll_view();
    }

    /// Suppress status-driven transitions for a while: a just-issued
    /// command has not necessarily taken effect at the player yet.
    fn chill_out(&mut self) {
        self.chill_until = Instant::now() + self.cooldown;
    }

    /// Signed browse: album selection when idle, track stepping when
    /// playing. While paused the controller stops first, then browses.
    pub fn jog(&mut self, delta: i32) {
        if delta == 0 || self.catalog.albums.is_empty() {
            return;
        }
        self.chill_out();
        if self.state == PlayState::Paused {
            self.stop();
        }
        match self.state {
            PlayState::Idle => {
                let len = self.catalog.albums.len() as i64;
                self.selected = (self.selected as i64 + i64::from(delta)).rem_euclid(len) as usize;
                self.render();
            }
            PlayState::Playing => {
                let len = self.current_album().map_or(0, |a| a.tracks.len()) as i64;
                let next = i64::from(self.tracknum) + i64::from(delta);
                if next < 1 || next > len {
                    // Off either end of the album: stop, no wrapping.
                    self.stop();
                    return;
                }
                self.tracknum = next as u32;
                self.render();
                let step = if delta > 0 {
                    PlayerCmd::Next
                } else {
                    PlayerCmd::Previous
                };
                for _ in 0..delta.unsigned_abs() {
                    self.player.send(step.clone());
                }
            }
            PlayState::Asleep | PlayState::Paused => {}
        }
    }

    /// The single button: play when idle, pause when playing, resume
    /// when paused.
    pub fn button(&mut self) {
        if self.catalog.albums.is_empty() {
            return;
        }
        match self.state {
            PlayState::Idle => self.play(),
            PlayState::Playing => self.pause(),
            PlayState::Paused => self.resume(),
            PlayState::Asleep => {}
        }
    }

    fn play(&mut self) {
        let Some(album) = self.catalog.albums.get(self.selected) else {
            return;
        };
        let paths: Vec<PathBuf> = album.tracks.iter().map(|t| t.path.clone()).collect();
        self.chill_out();
        self.tracknum = 1;
        self.set_state(PlayState::Playing);
        self.render();
        self.player.send(PlayerCmd::Clear);
        self.player.send(PlayerCmd::Append(paths));
        self.player.send(PlayerCmd::Play);
    }

    fn pause(&mut self) {
        self.chill_out();
        self.set_state(PlayState::Paused);
        self.render();
        self.player.send(PlayerCmd::Pause);
    }

    fn resume(&mut self) {
        self.chill_out();
        self.set_state(PlayState::Playing);
        self.render();
        self.player.send(PlayerCmd::Resume);
    }

    fn stop(&mut self) {
        self.chill_out();
        self.tracknum = 0;
        self.set_state(PlayState::Idle);
        self.render();
        self.player.send(PlayerCmd::Stop);
    }

    /// Apply a status poll. Reads inside the cooldown window are stale
    /// by definition and get discarded.
    pub fn on_status(&mut self, status: PlayerStatus, now: Instant) {
        if now < self.chill_until || self.state != PlayState::Playing {
            return;
        }
        match status {
            PlayerStatus::Playing(path) => {
                let Some(no) = self.current_album().and_then(|a| a.ordinal_of(&path)) else {
                    return;
                };
                if no != self.tracknum {
                    self.tracknum = no;
                    self.render();
                }
            }
            PlayerStatus::Stopped => self.finish_play(),
        }
    }

    /// Album finished: decay every weight, credit the finished album,
    /// re-rank and persist. Selection follows the album.
    fn finish_play(&mut self) {
        self.tracknum = 0;
        self.set_state(PlayState::Idle);

        let finished = self.catalog.albums.get(self.selected).map(|a| a.path.clone());
        for album in &mut self.catalog.albums {
            album.plays *= self.decay;
        }
        if let Some(album) = self.catalog.albums.get_mut(self.selected) {
            album.plays += 1.0;
        }
        rank(&mut self.catalog.albums, unix_now(), self.recent_window_secs);
        self.catalog.persist();

        if let Some(path) = finished {
            if let Some(idx) = self.catalog.albums.iter().position(|a| a.path == path) {
                self.selected = idx;
            }
        }
        self.render();
    }

    /// Whether enough idle time has passed to rescan the library.
    pub fn rescan_due(&self, now: Instant) -> bool {
        self.state == PlayState::Idle
            && now.duration_since(self.last_scan) > self.rescan_interval
    }

    /// Walk the library again. Safe to repeat: known album paths are
    /// skipped and existing records never change. Selection follows the
    /// album across the re-rank.
    pub fn rescan(&mut self, settings: &LibrarySettings) {
        let keep = self.catalog.albums.get(self.selected).map(|a| a.path.clone());
        let added = scan(
            &self.root,
            &mut self.catalog,
            settings,
            self.recent_window_secs,
        );
        if added > 0 {
            log::info!("rescan added {added} album(s)");
        }
        self.last_scan = Instant::now();
        if let Some(path) = keep {
            if let Some(idx) = self.catalog.albums.iter().position(|a| a.path == path) {
                self.selected = idx;
            }
        }
        self.render();
    }

    /// Inactivity timeout hit: go dark. Auxiliary power is switched by
    /// the event loop, not here.
    pub fn sleep(&mut self) {
        self.set_state(PlayState::Asleep);
        self.render();
    }

    /// Any input while asleep wakes the kiosk; the waking event is
    /// consumed by the caller.
    pub fn wake(&mut self) {
        if self.state == PlayState::Asleep {
            self.set_state(PlayState::Idle);
            self.render();
        }
    }
}
