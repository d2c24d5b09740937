use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Directory under the per-user data and cache dirs, shared with the engine.
const ENGINE_DIR: &str = "argos-translate";

pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/argosopentech/argospm-index/main/index.json";

/// Returns: `<data_dir>/argos-translate/packages`
#[tracing::instrument(skip(runtime))]
pub fn default_package_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let data_dir = runtime
        .data_dir()
        .context("Could not find the user data directory")?;
    Ok(data_dir.join(ENGINE_DIR).join("packages"))
}

/// Returns: `<cache_dir>/argos-translate`
#[tracing::instrument(skip(runtime))]
pub fn default_cache_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let cache_dir = runtime
        .cache_dir()
        .context("Could not find the user cache directory")?;
    Ok(cache_dir.join(ENGINE_DIR))
}

/// A URL ending in `/` names a mirror; the index lives at `index.json` in it.
pub fn normalize_index_url(url: &str) -> String {
    if url.ends_with('/') {
        format!("{}index.json", url)
    } else {
        url.to_string()
    }
}
