//! Durable storage for the album list: one hidden JSON file under the
//! library root, rewritten wholesale on every mutation.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::model::Album;

/// File name of the catalog, directly under the library root.
pub const CATALOG_FILE: &str = ".jukewheel.json";

/// Schema version written to the file. Bump on layout changes so old
/// files fail loudly instead of deserializing garbage.
const CATALOG_VERSION: u32 = 1;

#[derive(Deserialize)]
struct CatalogFile {
    version: u32,
    albums: Vec<Album>,
}

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    version: u32,
    albums: &'a [Album],
}

/// The persisted album list. The scanner appends to it, the controller
/// reorders and reweights it; nothing else touches it.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    pub albums: Vec<Album>,
}

impl Catalog {
    /// Load the catalog under `root`, or start empty when no file exists.
    /// A file that exists but cannot be parsed is fatal: the catalog is
    /// required to bootstrap controller state.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(Self {
                path,
                albums: Vec::new(),
            });
        }

        let file =
            File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
        let parsed: CatalogFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed catalog file {}", path.display()))?;
        if parsed.version != CATALOG_VERSION {
            bail!(
                "catalog file {} has schema version {}, expected {}",
                path.display(),
                parsed.version,
                CATALOG_VERSION
            );
        }

        Ok(Self {
            path,
            albums: parsed.albums,
        })
    }

    /// Rewrite the catalog file from the in-memory album list.
    pub fn save(&self) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        serde_json::to_writer_pretty(
            BufWriter::new(file),
            &CatalogFileRef {
                version: CATALOG_VERSION,
                albums: &self.albums,
            },
        )
        .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Save, logging failures instead of returning them. Persistence is
    /// best effort per mutation; the next mutation retries.
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("failed to persist catalog: {e:#}");
        }
    }
}
