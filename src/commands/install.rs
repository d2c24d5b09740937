use anyhow::Result;

use crate::{
    application::{PackageResolver, Resolution},
    backend::PackageBackend,
    package::LanguagePair,
    runtime::Runtime,
};

use super::config::{Config, ConfigOverrides};

/// Install the package for a language pair unless it is already present.
#[tracing::instrument(skip(runtime, overrides))]
pub async fn install<R: Runtime>(
    runtime: R,
    overrides: ConfigOverrides,
    source_code: &str,
    target_code: &str,
) -> Result<()> {
    let config = Config::new(runtime, overrides)?;
    let backend = config.backend();
    let message = run(&backend, source_code, target_code).await?;
    println!("{}", message);
    Ok(())
}

pub(crate) async fn run<B: PackageBackend>(
    backend: &B,
    source_code: &str,
    target_code: &str,
) -> Result<String> {
    let resolution = PackageResolver::new(backend)
        .ensure_package_installed(source_code, target_code)
        .await?;
    Ok(resolution_message(
        &LanguagePair::new(source_code, target_code),
        &resolution,
    ))
}

pub(crate) fn resolution_message(pair: &LanguagePair, resolution: &Resolution) -> String {
    match resolution {
        Resolution::AlreadyInstalled(_) => format!("{} package already installed.", pair),
        Resolution::Installed { .. } => format!("{} package installed successfully.", pair),
    }
}
