//! Catalog record types: `Album` and `Track`, plus the ranking order.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One audio file inside an album. Immutable once scanned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub discnum: u32,
    pub tracknum: u32,
    pub path: PathBuf,
}

impl Track {
    /// Canonical play order inside an album.
    pub fn sort_key(&self) -> (u32, u32, &Path) {
        (self.discnum, self.tracknum, &self.path)
    }
}

/// One album directory. `path` is the unique key; a path already present
/// in the catalog is never rescanned or mutated by the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Filesystem mtime of the first track, epoch seconds.
    pub added: u64,
    /// Decayed play count used for ranking. Starts at 1.0.
    pub plays: f64,
    pub path: PathBuf,
    pub cover: PathBuf,
    pub tracks: Vec<Track>,
}

impl Album {
    /// Whether the album was added within the recency window ending now.
    pub fn is_recent(&self, now: u64, window_secs: u64) -> bool {
        self.added > now.saturating_sub(window_secs)
    }

    /// Ranking key, compared descending: recently added albums first,
    /// then by play weight, then by recency of addition.
    pub fn rank_key(&self, now: u64, window_secs: u64) -> (bool, f64, u64) {
        (self.is_recent(now, window_secs), self.plays, self.added)
    }

    /// 1-based position of `path` in the canonical play order.
    pub fn ordinal_of(&self, path: &Path) -> Option<u32> {
        self.tracks
            .iter()
            .position(|t| t.path == path)
            .map(|i| i as u32 + 1)
    }
}

/// Sort albums into display order, best ranked first.
pub fn rank(albums: &mut [Album], now: u64, window_secs: u64) {
    albums.sort_by(|a, b| {
        b.rank_key(now, window_secs)
            .partial_cmp(&a.rank_key(now, window_secs))
            .unwrap_or(Ordering::Equal)
    });
}

/// Current time as epoch seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
