//! Album library: the data model, the persisted catalog and the
//! directory scanner that grows it.

mod catalog;
mod model;
mod scan;
mod tags;

pub use catalog::{CATALOG_FILE, Catalog};
pub use model::{Album, Track, rank, unix_now};
pub use scan::scan;

#[cfg(test)]
mod tests;
