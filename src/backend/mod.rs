//! Package backend abstraction.
//!
//! The resolver only sequences and matches; fetching the index, listing the
//! store and installing a package are delegated to a [`PackageBackend`].

mod local;

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

use crate::package::{AvailablePackageIndex, InstalledPackageSet, LanguagePackageDescriptor};

pub use local::LocalBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageBackend: Send + Sync {
    /// Fetch a fresh copy of the remote package index.
    async fn update_index(&self) -> Result<AvailablePackageIndex>;

    /// Snapshot of the packages currently in the local store.
    fn installed_packages(&self) -> Result<InstalledPackageSet>;

    /// Download and install a package, returning its directory.
    async fn install(&self, descriptor: &LanguagePackageDescriptor) -> Result<PathBuf>;
}
