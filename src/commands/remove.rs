use anyhow::Result;
use log::debug;

use crate::{package::LanguagePair, runtime::Runtime};

use super::config::{Config, ConfigOverrides};

/// Delete an installed package.
#[tracing::instrument(skip(runtime, overrides))]
pub fn remove<R: Runtime>(
    runtime: R,
    overrides: ConfigOverrides,
    source_code: &str,
    target_code: &str,
) -> Result<()> {
    let config = Config::new(runtime, overrides)?;
    let pair = LanguagePair::new(source_code, target_code);

    let removed = config.repository().remove(&pair)?;
    debug!("Removed {:?}", removed.path);
    println!("{} package removed.", pair);
    Ok(())
}
