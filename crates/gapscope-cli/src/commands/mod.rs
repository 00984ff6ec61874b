//! CLI command implementations.

pub mod bank;
pub mod report;
pub mod summary;
pub mod years;

use std::path::Path;
use std::sync::Arc;

use gapscope::{CountryCatalog, DatasetHandle, DatasetSnapshot, Gapscope, GapscopeConfig};
use tracing::debug;

/// Build the pipeline from an optional configuration file.
pub fn engine(config: Option<&Path>) -> Result<Gapscope, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => GapscopeConfig::from_json_file(path)?,
        None => GapscopeConfig::default(),
    };
    Ok(Gapscope::with_config(config))
}

/// Load a scores file through a dataset handle.
pub fn load(engine: Gapscope, file: &Path) -> Result<(DatasetHandle, Arc<DatasetSnapshot>), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    debug!(file = %file.display(), "loading scores");
    let handle = DatasetHandle::new(engine);
    let runtime = tokio::runtime::Runtime::new()?;
    let snapshot = runtime.block_on(handle.load_from_path(file))?;
    Ok((handle, snapshot))
}

pub fn catalog(meta: Option<&Path>) -> Result<Option<CountryCatalog>, Box<dyn std::error::Error>> {
    Ok(meta.map(CountryCatalog::load).transpose()?)
}
