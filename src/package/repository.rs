//! The local package store.
//!
//! Layout: `<package_root>/<package-dir>/metadata.json`, one directory per
//! installed language package.

use anyhow::{Result, bail};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::{InstalledPackage, InstalledPackageSet, LanguagePackageDescriptor, LanguagePair};

pub const METADATA_FILE: &str = "metadata.json";

pub struct PackageRepository<'a, R: Runtime> {
    runtime: &'a R,
    package_root: PathBuf,
}

impl<'a, R: Runtime> PackageRepository<'a, R> {
    pub fn new(runtime: &'a R, package_root: PathBuf) -> Self {
        Self {
            runtime,
            package_root,
        }
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Returns: `<package_root>/translate-<from>_<to>`
    pub fn package_dir(&self, descriptor: &LanguagePackageDescriptor) -> PathBuf {
        self.package_root.join(descriptor.dir_name())
    }

    /// Scans the store. Directories without readable metadata are skipped
    /// with a warning; a missing store is empty.
    #[tracing::instrument(skip(self))]
    pub fn installed(&self) -> Result<InstalledPackageSet> {
        let mut installed = InstalledPackageSet::new();

        if !self.runtime.exists(&self.package_root) {
            debug!("Package root {:?} does not exist yet", self.package_root);
            return Ok(installed);
        }

        for path in self.runtime.read_dir(&self.package_root)? {
            if !self.runtime.is_dir(&path) {
                continue;
            }
            let metadata_path = path.join(METADATA_FILE);
            if !self.runtime.exists(&metadata_path) {
                debug!("Skipping {:?}: no {}", path, METADATA_FILE);
                continue;
            }

            match LanguagePackageDescriptor::load(self.runtime, &metadata_path) {
                Ok(descriptor) if descriptor.is_translation() => {
                    installed.insert(InstalledPackage { descriptor, path });
                }
                Ok(_) => debug!("Skipping {:?}: not a translation package", path),
                Err(e) => warn!("Failed to load metadata from {:?}: {}", metadata_path, e),
            }
        }

        debug!("Found {} installed package(s)", installed.len());
        Ok(installed)
    }

    pub fn find(&self, pair: &LanguagePair) -> Result<Option<InstalledPackage>> {
        Ok(self.installed()?.get(pair).cloned())
    }

    /// Deletes the directory of an installed package.
    #[tracing::instrument(skip(self))]
    pub fn remove(&self, pair: &LanguagePair) -> Result<InstalledPackage> {
        let Some(package) = self.find(pair)? else {
            bail!("Package {} is not installed.", pair);
        };
        self.runtime.remove_dir_all(&package.path)?;
        Ok(package)
    }
}
