//! jukewheel: a kiosk-style controller for a local album library,
//! driving an external player with a knob and a single button.

mod app;
mod config;
mod input;
mod library;
mod player;
mod render;
mod runtime;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Knob-and-button jukebox for a local album library")]
struct Args {
    /// Root directory of the music library.
    root: PathBuf,
    /// Clear the terminal and redraw on every state change instead of
    /// logging one line per redraw.
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    runtime::run(resolve_root(&args.root)?, args.fullscreen)
}

/// The root must exist and is normalized to an absolute path before
/// anything derives from it: catalog keys and track paths are built
/// under the root, and the player reports absolute paths back in its
/// status output. A relative root would break that mapping and give the
/// same library a second identity in its own catalog file.
fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    root.canonicalize()
        .with_context(|| format!("failed to resolve {}", root.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::resolve_root;

    #[test]
    fn resolve_root_yields_an_absolute_normalized_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let resolved = resolve_root(&dir.path().join("sub").join("..")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn resolve_root_rejects_non_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"x").unwrap();

        assert!(resolve_root(&file).is_err());
        assert!(resolve_root(&dir.path().join("missing")).is_err());
    }
}
