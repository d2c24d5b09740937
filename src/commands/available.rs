use anyhow::Result;

use crate::{
    backend::PackageBackend,
    package::{AvailablePackageIndex, InstalledPackageSet, Package},
    runtime::Runtime,
};

use super::{
    config::{Config, ConfigOverrides},
    list::package_line,
};

/// Fetch the package index and print every translation package it offers.
#[tracing::instrument(skip(runtime, overrides))]
pub async fn available<R: Runtime>(runtime: R, overrides: ConfigOverrides) -> Result<()> {
    let config = Config::new(runtime, overrides)?;
    let backend = config.backend();

    let index = backend.update_index().await?;
    let installed = backend.installed_packages()?;

    if index.is_empty() {
        println!("No packages available.");
        return Ok(());
    }

    for line in available_lines(&index, &installed) {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn available_lines(
    index: &AvailablePackageIndex,
    installed: &InstalledPackageSet,
) -> Vec<String> {
    index
        .iter()
        .map(|descriptor| {
            let line = package_line(descriptor);
            if installed.contains(&descriptor.pair()) {
                format!("{} [installed]", line)
            } else {
                line
            }
        })
        .collect()
}
