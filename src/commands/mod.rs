//! Command layer. Builds a [`config::Config`], runs one use case and prints
//! the outcome. Nothing below this layer writes to stdout.

use anyhow::{Result, bail};

use crate::{
    application::PackageResolver,
    backend::PackageBackend,
    package::LanguagePair,
};

mod available;
pub mod config;
mod install;
mod list;
mod localize;
mod paths;
mod remove;
mod translate;

pub use available::available;
pub use config::{Config, ConfigOverrides};
pub use install::install;
pub use list::list;
pub use localize::{LocalizeArgs, localize};
pub use remove::remove;
pub use translate::translate;

/// Make sure a language pair can be used for translation. With `install` the
/// resolver fetches the package if needed; otherwise only the local store is
/// consulted and nothing touches the network.
pub(crate) async fn ensure_pair<B: PackageBackend>(
    backend: &B,
    source_code: &str,
    target_code: &str,
    install: bool,
) -> Result<()> {
    let pair = LanguagePair::new(source_code, target_code);

    if install {
        let resolution = PackageResolver::new(backend)
            .ensure_package_installed(source_code, target_code)
            .await?;
        if resolution.was_installed_now() {
            eprintln!("{}", install::resolution_message(&pair, &resolution));
        }
        return Ok(());
    }

    if !backend.installed_packages()?.contains(&pair) {
        bail!(
            "Package {} is not installed. Run `langpm install {} {}` or pass --install.",
            pair,
            source_code,
            target_code
        );
    }
    Ok(())
}
