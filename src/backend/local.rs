//! Backend over a local package directory and a remote JSON index.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::archive::ZipExtractor;
use crate::cleanup::{self, CleanupGuard, SharedCleanupContext};
use crate::download::{download_file, file_name_from_url};
use crate::http::HttpClient;
use crate::package::{
    AvailablePackageIndex, InstalledPackageSet, LanguagePackageDescriptor, METADATA_FILE, Package,
    PackageRepository,
};
use crate::runtime::Runtime;

use super::PackageBackend;

pub struct LocalBackend<'a, R: Runtime> {
    runtime: &'a R,
    http_client: HttpClient,
    index_url: String,
    repository: PackageRepository<'a, R>,
    download_dir: PathBuf,
    extractor: ZipExtractor,
}

impl<'a, R: Runtime> LocalBackend<'a, R> {
    pub fn new(
        runtime: &'a R,
        http_client: HttpClient,
        index_url: impl Into<String>,
        package_root: PathBuf,
        cache_dir: &Path,
    ) -> Self {
        Self {
            runtime,
            http_client,
            index_url: index_url.into(),
            repository: PackageRepository::new(runtime, package_root),
            download_dir: cache_dir.join("downloads"),
            extractor: ZipExtractor,
        }
    }

    fn download_path(&self, descriptor: &LanguagePackageDescriptor, url: &str) -> PathBuf {
        let file_name = file_name_from_url(url)
            .filter(|name| self.extractor.can_handle(Path::new(name)))
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.argosmodel", descriptor.dir_name()));
        self.download_dir.join(file_name)
    }

    async fn download_and_unpack(
        &self,
        descriptor: &LanguagePackageDescriptor,
        url: &str,
        download_path: &Path,
        package_dir: &Path,
        cleanup_ctx: SharedCleanupContext,
    ) -> Result<()> {
        let download_guard = CleanupGuard::new(cleanup_ctx.clone(), download_path.to_path_buf());
        download_file(self.runtime, url, download_path, &self.http_client).await?;

        if self.runtime.exists(package_dir) {
            debug!("Replacing existing directory {:?}", package_dir);
            self.runtime.remove_dir_all(package_dir)?;
        }
        let package_guard = CleanupGuard::new(cleanup_ctx.clone(), package_dir.to_path_buf());
        self.extractor
            .extract(self.runtime, download_path, package_dir, Some(cleanup_ctx))?;

        self.verify(descriptor, package_dir)?;

        package_guard.success();
        download_guard.success();
        Ok(())
    }

    /// The unpacked metadata must describe the pair that was asked for.
    fn verify(&self, descriptor: &LanguagePackageDescriptor, package_dir: &Path) -> Result<()> {
        let metadata_path = package_dir.join(METADATA_FILE);
        if !self.runtime.exists(&metadata_path) {
            bail!(
                "Package archive for {} has no metadata.json",
                descriptor.pair()
            );
        }

        let installed = LanguagePackageDescriptor::load(self.runtime, &metadata_path)
            .with_context(|| format!("Invalid metadata in {:?}", metadata_path))?;
        if installed.pair() != descriptor.pair() {
            bail!(
                "Package archive for {} declares {} instead",
                descriptor.pair(),
                installed.pair()
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<'a, R: Runtime> PackageBackend for LocalBackend<'a, R> {
    #[tracing::instrument(skip(self))]
    async fn update_index(&self) -> Result<AvailablePackageIndex> {
        info!("Updating package index from {}...", self.index_url);

        let entries: Vec<LanguagePackageDescriptor> = self
            .http_client
            .get_json(&self.index_url)
            .await
            .context("Failed to fetch package index")?;

        let index: AvailablePackageIndex =
            entries.into_iter().filter(|d| d.is_translation()).collect();
        debug!("Index lists {} translation package(s)", index.len());
        Ok(index)
    }

    fn installed_packages(&self) -> Result<InstalledPackageSet> {
        self.repository.installed()
    }

    #[tracing::instrument(skip(self, descriptor), fields(pair = %descriptor.pair()))]
    async fn install(&self, descriptor: &LanguagePackageDescriptor) -> Result<PathBuf> {
        let url = descriptor
            .links
            .first()
            .with_context(|| format!("Package {} has no download links", descriptor.pair()))?;

        let download_path = self.download_path(descriptor, url);
        let package_dir = self.repository.package_dir(descriptor);
        self.runtime.create_dir_all(self.repository.package_root())?;

        let cleanup_ctx = cleanup::new_shared();
        let cleanup_ctx_clone = cleanup_ctx.clone();
        let ctrl_c_handler = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nInterrupted, cleaning up...");
                if let Ok(ctx) = cleanup_ctx_clone.lock() {
                    ctx.cleanup();
                }
                std::process::exit(130);
            }
        });

        let result = self
            .download_and_unpack(descriptor, url, &download_path, &package_dir, cleanup_ctx)
            .await;

        ctrl_c_handler.abort();

        if self.runtime.exists(&download_path)
            && let Err(e) = self.runtime.remove_file(&download_path)
        {
            warn!("Failed to remove downloaded file {:?}: {}", download_path, e);
        }

        if let Err(e) = result {
            if self.runtime.exists(&package_dir)
                && let Err(cleanup_err) = self.runtime.remove_dir_all(&package_dir)
            {
                warn!(
                    "Failed to remove partial package {:?}: {}",
                    package_dir, cleanup_err
                );
            }
            return Err(e);
        }

        info!("Installed {} into {:?}", descriptor.pair(), package_dir);
        Ok(package_dir)
    }
}
