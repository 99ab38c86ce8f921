//! Line-oriented persistence for worklists.
//!
//! One item's text per line. A missing backing file is not an error: it
//! loads as the empty list. Storing overwrites the destination fully.

use std::fs;
use std::io;
use std::path::Path;

use crate::item::Item;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Load a worklist, skipping blank lines and trimming the rest.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Item>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Item::new)
        .collect())
}

/// Overwrite `path` with the given items, one per line.
///
/// No escaping is performed: an item whose text contains the line separator
/// will load back as multiple items.
pub fn store(items: &[Item], path: impl AsRef<Path>) -> Result<(), StoreError> {
    let mut out = String::new();
    for item in items {
        out.push_str(item.text());
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
