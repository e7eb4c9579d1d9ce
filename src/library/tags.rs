//! The tag-reading boundary: disc/track numbers and embedded covers.
//!
//! Codec internals belong to lofty; this module only consumes the
//! `discnumber`/`tracknumber` fields and the first embedded picture.

use std::fs;
use std::path::{Path, PathBuf};

use lofty::file::TaggedFileExt;
use lofty::picture::MimeType;
use lofty::probe::Probe;
use lofty::tag::ItemKey;

/// Tag numbers come as "7", "7/12", or not at all. Take the first
/// component.
pub fn parse_number(s: &str) -> Option<u32> {
    s.split('/').next()?.trim().parse().ok()
}

/// Leading run of ASCII digits in a file name: "03 - Song.flac" -> 3.
pub fn filename_number(name: &str) -> Option<u32> {
    let digits: &str = name
        .split_once(|c: char| !c.is_ascii_digit())
        .map(|(head, _)| head)
        .unwrap_or(name);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Read `(discnum, tracknum)` from the file's tags. Disc defaults to 1;
/// a missing or unreadable track number comes back as `None` so the
/// caller can try the filename fallback.
pub fn track_numbers(path: &Path) -> (u32, Option<u32>) {
    let tagged = match Probe::open(path).and_then(|p| p.read()) {
        Ok(t) => t,
        Err(_) => return (1, None),
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return (1, None);
    };

    let disc = tag
        .get_string(&ItemKey::DiscNumber)
        .and_then(parse_number)
        .unwrap_or(1);
    let track = tag.get_string(&ItemKey::TrackNumber).and_then(parse_number);
    (disc, track)
}

/// Extract the first embedded picture of `track`, writing it beside the
/// file as `cover.<ext>`. Only gif/png/jpeg/bmp pictures are accepted;
/// anything else (or a write failure) yields `None` with a warning.
pub fn extract_cover(track: &Path) -> Option<PathBuf> {
    let tagged = Probe::open(track).and_then(|p| p.read()).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    let pic = tag.pictures().first()?;

    let ext = match pic.mime_type() {
        Some(MimeType::Gif) => "gif",
        Some(MimeType::Png) => "png",
        Some(MimeType::Jpeg) => "jpg",
        Some(MimeType::Bmp) => "bmp",
        other => {
            log::warn!(
                "{}: embedded picture has unsupported mime type {:?}",
                track.display(),
                other
            );
            return None;
        }
    };

    let cover = track.parent()?.join(format!("cover.{ext}"));
    if let Err(e) = fs::write(&cover, pic.data()) {
        log::warn!(
            "{}: failed to write cover {}: {e}",
            track.display(),
            cover.display()
        );
        return None;
    }
    Some(cover)
}
