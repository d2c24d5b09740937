use crate::cleanup::{CleanupGuard, SharedCleanupContext};
use crate::runtime::Runtime;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info, warn};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const EXTENSIONS: &[&str] = &[".argosmodel", ".zip"];

/// Extractor for zip-based package archives
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn can_handle(&self, archive_path: &Path) -> bool {
        let name = archive_path.to_string_lossy().to_lowercase();
        EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }

    /// Extracts `archive_path` into `extract_to`. When the archive holds a
    /// single top-level directory its contents land directly in `extract_to`.
    /// The scratch directory is registered with `cleanup_ctx` while in use.
    #[tracing::instrument(skip(self, runtime, cleanup_ctx))]
    pub fn extract<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
        cleanup_ctx: Option<SharedCleanupContext>,
    ) -> Result<()> {
        if !self.can_handle(archive_path) {
            bail!("Unsupported archive format: {}", archive_path.display());
        }

        debug!("Extracting {:?} to {:?}...", archive_path, extract_to);
        let mut reader = runtime
            .open(archive_path)
            .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

        // ZipArchive needs Read + Seek
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
        let mut archive = ZipArchive::new(std::io::Cursor::new(buffer))
            .with_context(|| format!("Failed to parse zip archive {:?}", archive_path))?;

        let temp_extract_dir = temp_dir_for(extract_to)?;
        if runtime.exists(&temp_extract_dir) {
            runtime.remove_dir_all(&temp_extract_dir)?;
        }
        runtime.create_dir_all(&temp_extract_dir)?;
        let guard = cleanup_ctx.map(|ctx| CleanupGuard::new(ctx, temp_extract_dir.clone()));

        if let Err(e) = unpack(runtime, &mut archive, &temp_extract_dir, extract_to) {
            if runtime.exists(&temp_extract_dir)
                && let Err(cleanup_err) = runtime.remove_dir_all(&temp_extract_dir)
            {
                warn!("Failed to remove {:?}: {}", temp_extract_dir, cleanup_err);
            }
            return Err(e);
        }

        runtime.remove_dir_all(&temp_extract_dir)?;
        if let Some(guard) = guard {
            guard.success();
        }

        info!("Extraction complete.");
        Ok(())
    }
}

/// Writes every entry under `temp_dir`, then moves the package contents
/// into `extract_to`.
fn unpack<R: Runtime, S: Read + Seek>(
    runtime: &R,
    archive: &mut ZipArchive<S>,
    temp_dir: &Path,
    extract_to: &Path,
) -> Result<()> {
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read zip entry {}", i))?;

        let Some(entry_path) = entry.enclosed_name() else {
            debug!("Skipping entry with unsafe path: {}", entry.name());
            continue;
        };
        let full_path = temp_dir.join(entry_path);

        if entry.is_dir() {
            runtime.create_dir_all(&full_path)?;
        } else {
            if let Some(parent) = full_path.parent() {
                runtime.create_dir_all(parent)?;
            }
            let mut dest_file = runtime.create_file(&full_path)?;
            std::io::copy(&mut entry, &mut dest_file)
                .with_context(|| format!("Failed to extract file {:?}", full_path))?;
        }
    }

    let entries = runtime
        .read_dir(temp_dir)
        .context("Failed to read temp extraction directory")?;
    let source_dir = match entries.as_slice() {
        [] => return Err(anyhow!("Archive appears to be empty.")),
        [single] if runtime.is_dir(single) => single.clone(),
        _ => temp_dir.to_path_buf(),
    };

    runtime.create_dir_all(extract_to)?;
    for item in runtime.read_dir(&source_dir)? {
        let name = item
            .file_name()
            .with_context(|| format!("Unexpected entry {:?} in archive", item))?;
        runtime.rename(&item, &extract_to.join(name))?;
    }
    Ok(())
}

fn temp_dir_for(extract_to: &Path) -> Result<PathBuf> {
    let name = extract_to
        .file_name()
        .with_context(|| format!("Invalid extraction target {:?}", extract_to))?;
    Ok(extract_to.with_file_name(format!(".{}_temp_extract", name.to_string_lossy())))
}
