use anyhow::Result;
use log::debug;

use crate::{
    package::{InstalledPackageSet, LanguagePackageDescriptor},
    runtime::Runtime,
};

use super::config::{Config, ConfigOverrides};

/// List all installed packages
#[tracing::instrument(skip(runtime, overrides))]
pub fn list<R: Runtime>(runtime: R, overrides: ConfigOverrides) -> Result<()> {
    let config = Config::new(runtime, overrides)?;
    debug!("Listing packages from {:?}", config.package_root);

    let installed = config.repository().installed()?;
    if installed.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    for line in installed_lines(&installed) {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn installed_lines(installed: &InstalledPackageSet) -> Vec<String> {
    installed
        .iter()
        .map(|package| package_line(&package.descriptor))
        .collect()
}

/// `en-es 1.9 (English → Spanish)`
pub(crate) fn package_line(descriptor: &LanguagePackageDescriptor) -> String {
    format!(
        "{}-{} {} ({})",
        descriptor.from_code,
        descriptor.to_code,
        descriptor
            .package_version
            .as_deref()
            .unwrap_or("(unknown)"),
        descriptor.display_name()
    )
}
