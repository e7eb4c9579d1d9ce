use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{IncludePolicy, LibrarySettings};

use super::*;

fn track(disc: u32, no: u32, path: &str) -> Track {
    Track {
        discnum: disc,
        tracknum: no,
        path: PathBuf::from(path),
    }
}

fn album_at(path: &str, added: u64, plays: f64) -> Album {
    Album {
        added,
        plays,
        path: PathBuf::from(path),
        cover: PathBuf::from(path).join("cover.jpg"),
        tracks: Vec::new(),
    }
}

#[test]
fn tracks_sort_by_disc_then_number() {
    let mut tracks = vec![
        track(2, 1, "/a/d2t1.mp3"),
        track(1, 10, "/a/d1t10.mp3"),
        track(1, 2, "/a/d1t2.mp3"),
    ];
    tracks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let order: Vec<u32> = tracks.iter().map(|t| t.tracknum).collect();
    assert_eq!(order, vec![2, 10, 1]);
    assert_eq!(tracks[2].discnum, 2);
}

#[test]
fn ordinal_is_position_in_play_order_not_the_tag() {
    let album = Album {
        added: 0,
        plays: 1.0,
        path: PathBuf::from("/a"),
        cover: PathBuf::from("/a/cover.jpg"),
        // Tag numbering starts at 5; ordinals still count from 1.
        tracks: vec![track(1, 5, "/a/x.mp3"), track(1, 6, "/a/y.mp3")],
    };
    assert_eq!(album.ordinal_of(Path::new("/a/x.mp3")), Some(1));
    assert_eq!(album.ordinal_of(Path::new("/a/y.mp3")), Some(2));
    assert_eq!(album.ordinal_of(Path::new("/a/z.mp3")), None);
}

#[test]
fn rank_prefers_recent_then_weight_then_added() {
    let now = 1_000_000;
    let window = 100;
    let mut albums = vec![
        album_at("/heavy", 0, 9.0),
        album_at("/fresh", now - 10, 1.0),
        album_at("/light-new", 500, 2.0),
        album_at("/light-old", 400, 2.0),
    ];
    rank(&mut albums, now, window);

    let order: Vec<&Path> = albums.iter().map(|a| a.path.as_path()).collect();
    assert_eq!(
        order,
        vec![
            Path::new("/fresh"),
            Path::new("/heavy"),
            Path::new("/light-new"),
            Path::new("/light-old"),
        ]
    );
}

#[test]
fn catalog_starts_empty_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();
    assert!(catalog.albums.is_empty());
}

#[test]
fn catalog_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::open(dir.path()).unwrap();
    catalog.albums.push(Album {
        added: 42,
        plays: 1.5,
        path: PathBuf::from("/music/a"),
        cover: PathBuf::from("/music/a/cover.png"),
        tracks: vec![track(1, 1, "/music/a/01.mp3")],
    });
    catalog.save().unwrap();

    let reloaded = Catalog::open(dir.path()).unwrap();
    assert_eq!(reloaded.albums, catalog.albums);
}

#[test]
fn malformed_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CATALOG_FILE), "not json at all").unwrap();
    assert!(Catalog::open(dir.path()).is_err());
}

#[test]
fn catalog_version_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CATALOG_FILE),
        r#"{"version": 99, "albums": []}"#,
    )
    .unwrap();

    let err = Catalog::open(dir.path()).unwrap_err();
    assert!(err.to_string().contains("version 99"));
}

#[test]
fn tag_numbers_take_the_first_slash_component() {
    assert_eq!(tags::parse_number("7"), Some(7));
    assert_eq!(tags::parse_number("7/12"), Some(7));
    assert_eq!(tags::parse_number(" 3 "), Some(3));
    assert_eq!(tags::parse_number("x"), None);
    assert_eq!(tags::parse_number(""), None);
}

#[test]
fn filename_numbers_are_the_leading_digit_run() {
    assert_eq!(tags::filename_number("03 - Song.flac"), Some(3));
    assert_eq!(tags::filename_number("12.ogg"), Some(12));
    assert_eq!(tags::filename_number("intro.mp3"), None);
    assert_eq!(tags::filename_number(""), None);
}

// Scanner fixtures. The files are not real audio, so tag reads fail and
// the filename fallback carries the track numbers.

fn write_album(root: &Path, name: &str, files: &[&str]) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for f in files {
        fs::write(dir.join(f), b"x").unwrap();
    }
    dir
}

fn settings() -> LibrarySettings {
    LibrarySettings::default()
}

fn scan_once(root: &Path, catalog: &mut Catalog, settings: &LibrarySettings) -> usize {
    scan(root, catalog, settings, 0)
}

#[test]
fn scan_picks_up_a_plain_album() {
    let dir = TempDir::new().unwrap();
    let a = write_album(
        dir.path(),
        "a",
        &["1 - one.mp3", "2 - two.mp3", "3 - three.mp3", "cover.jpg"],
    );
    let mut catalog = Catalog::open(dir.path()).unwrap();

    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 1);
    let album = &catalog.albums[0];
    assert_eq!(album.path, a);
    assert_eq!(album.cover, a.join("cover.jpg"));
    let numbers: Vec<u32> = album.tracks.iter().map(|t| t.tracknum).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    // The catalog file landed under the root.
    assert!(dir.path().join(CATALOG_FILE).exists());
}

#[test]
fn scan_never_revisits_known_albums() {
    let dir = TempDir::new().unwrap();
    let a = write_album(dir.path(), "a", &["1.mp3", "cover.jpg"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();
    scan_once(dir.path(), &mut catalog, &settings());
    let before = catalog.albums.clone();

    // New files in a known album directory change nothing.
    fs::write(a.join("2.mp3"), b"x").unwrap();
    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 0);
    assert_eq!(catalog.albums, before);
}

#[test]
fn album_without_a_number_is_skipped_until_fixed() {
    let dir = TempDir::new().unwrap();
    let a = write_album(dir.path(), "a", &["1.mp3", "untitled.mp3", "cover.jpg"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 0);

    fs::rename(a.join("untitled.mp3"), a.join("2 - untitled.mp3")).unwrap();
    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 1);
    assert_eq!(catalog.albums[0].tracks.len(), 2);
}

#[test]
fn album_without_a_cover_is_skipped_until_fixed() {
    let dir = TempDir::new().unwrap();
    let a = write_album(dir.path(), "a", &["1.mp3"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 0);

    fs::write(a.join("cover.png"), b"img").unwrap();
    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 1);
    assert_eq!(catalog.albums[0].cover, a.join("cover.png"));
}

#[test]
fn audio_directory_is_a_leaf_even_with_subdirectories() {
    let dir = TempDir::new().unwrap();
    let a = write_album(dir.path(), "a", &["1.mp3", "cover.jpg"]);
    // A nested directory below an album boundary is never descended into.
    write_album(dir.path(), "a/bonus", &["1.mp3", "cover.jpg"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 1);
    assert_eq!(catalog.albums[0].path, a);
}

#[test]
fn scan_descends_through_intermediate_directories() {
    let dir = TempDir::new().unwrap();
    write_album(dir.path(), "artist/album-a", &["1.mp3", "cover.jpg"]);
    write_album(dir.path(), "artist/album-b", &["1.mp3", "cover.jpg"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    assert_eq!(scan_once(dir.path(), &mut catalog, &settings()), 2);
}

#[test]
fn marker_policy_requires_a_marker_on_the_path() {
    let dir = TempDir::new().unwrap();
    write_album(dir.path(), "plain", &["1.mp3", "cover.jpg"]);
    let marked = write_album(dir.path(), "marked", &["1.mp3", "cover.jpg", ".jukewheel"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    let settings = LibrarySettings {
        include: IncludePolicy::Marker,
        ..LibrarySettings::default()
    };
    assert_eq!(scan_once(dir.path(), &mut catalog, &settings), 1);
    assert_eq!(catalog.albums[0].path, marked);
}

#[test]
fn marker_is_inherited_by_descendants() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("box")).unwrap();
    fs::write(dir.path().join("box/.jukewheel"), b"").unwrap();
    write_album(dir.path(), "box/disc1", &["1.mp3", "cover.jpg"]);
    write_album(dir.path(), "box/disc2", &["1.mp3", "cover.jpg"]);
    write_album(dir.path(), "loose", &["1.mp3", "cover.jpg"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    let settings = LibrarySettings {
        include: IncludePolicy::Marker,
        ..LibrarySettings::default()
    };
    assert_eq!(scan_once(dir.path(), &mut catalog, &settings), 2);
    assert!(catalog.albums.iter().all(|a| a.path.starts_with(dir.path().join("box"))));
}

#[test]
fn loose_cover_beats_other_images_alphabetically() {
    let dir = TempDir::new().unwrap();
    let a = write_album(dir.path(), "a", &["1.mp3", "back.jpg", "cover.jpg"]);
    let mut catalog = Catalog::open(dir.path()).unwrap();

    scan_once(dir.path(), &mut catalog, &settings());
    // First image in sorted listing order wins.
    assert_eq!(catalog.albums[0].cover, a.join("back.jpg"));
}
