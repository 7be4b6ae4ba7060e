//! File-backed logging. The terminal belongs to the game while it runs,
//! so records go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::Result;

/// Initialize the logger; level from `RUST_LOG`, `info` when unset.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
