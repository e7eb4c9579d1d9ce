//! The incremental album scanner.
//!
//! Depth-first walk of the library tree. Each directory is listed once;
//! directories holding audio files (and passing the inclusion policy)
//! are album boundaries and processed as leaves, everything else is
//! descended into. Paths already in the catalog are never revisited, so
//! rescans are cheap and append-only.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{IncludePolicy, LibrarySettings};

use super::catalog::Catalog;
use super::model::{Album, Track, rank, unix_now};
use super::tags;

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e.trim_start_matches('.') == ext)
        })
        .unwrap_or(false)
}

fn mtime_secs(path: &Path) -> u64 {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or_else(unix_now)
}

/// Walk `root` and append any newly discovered albums to `catalog`.
/// Returns the number of albums added. Each successful album is
/// persisted immediately, so a crash mid-scan loses no prior progress;
/// skipped albums are not recorded and will be attempted again on the
/// next scan.
pub fn scan(
    root: &Path,
    catalog: &mut Catalog,
    settings: &LibrarySettings,
    recent_window_secs: u64,
) -> usize {
    let visited: HashSet<PathBuf> = catalog.albums.iter().map(|a| a.path.clone()).collect();
    let before = catalog.albums.len();

    visit(root, false, &visited, catalog, settings);

    let added = catalog.albums.len() - before;
    rank(&mut catalog.albums, unix_now(), recent_window_secs);
    if added > 0 {
        catalog.persist();
    }
    added
}

fn visit(
    dir: &Path,
    inherited: bool,
    visited: &HashSet<PathBuf>,
    catalog: &mut Catalog,
    settings: &LibrarySettings,
) {
    if visited.contains(dir) {
        return;
    }

    let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(e) => {
            log::warn!("cannot list {}: {e}", dir.display());
            return;
        }
    };
    // Sorted so "first match" (loose covers) is deterministic.
    entries.sort();

    let include = match settings.include {
        IncludePolicy::Everything => true,
        IncludePolicy::Marker => {
            inherited
                || entries
                    .iter()
                    .any(|p| p.file_name() == Some(OsStr::new(&settings.marker_name)))
        }
    };
    let has_audio = entries
        .iter()
        .any(|p| has_extension(p, &settings.extensions));

    if include && has_audio {
        // Album boundary: process as a leaf, never descend.
        if let Some(album) = read_album(dir, &entries, settings) {
            log::info!("added {}", album.path.display());
            catalog.albums.push(album);
            catalog.persist();
        }
    } else {
        for child in entries.iter().filter(|p| p.is_dir()) {
            visit(child, include, visited, catalog, settings);
        }
    }
}

/// Build the album record for a boundary directory, or `None` (album
/// skipped, retried next scan) when a track number or the cover cannot
/// be resolved.
fn read_album(dir: &Path, entries: &[PathBuf], settings: &LibrarySettings) -> Option<Album> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut cover: Option<PathBuf> = None;

    for path in entries {
        if has_extension(path, &settings.extensions) {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let (discnum, tagged) = tags::track_numbers(path);
            let Some(tracknum) = tagged.or_else(|| tags::filename_number(name)) else {
                log::warn!(
                    "skipping {}: no track number for {}",
                    dir.display(),
                    path.display()
                );
                return None;
            };
            tracks.push(Track {
                discnum,
                tracknum,
                path: path.clone(),
            });
        } else if cover.is_none() && has_extension(path, &settings.cover_extensions) {
            cover = Some(path.clone());
        }
    }

    tracks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    let first = tracks.first()?;

    let cover = match cover.or_else(|| tags::extract_cover(&first.path)) {
        Some(cover) => cover,
        None => {
            log::warn!("skipping {}: no album cover found", dir.display());
            return None;
        }
    };

    Some(Album {
        added: mtime_secs(&first.path),
        plays: 1.0,
        path: dir.to_path_buf(),
        cover,
        tracks,
    })
}
