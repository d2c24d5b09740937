use anyhow::{Context, Result};
use std::io::{Read, Write};

use crate::{
    backend::PackageBackend,
    runtime::Runtime,
    translate::{Translator, strip_trailing_newline},
};

use super::{
    config::{Config, ConfigOverrides},
    ensure_pair,
};

/// Translate `text`, or all of stdin when no text is given.
#[tracing::instrument(skip(runtime, overrides, text))]
pub async fn translate<R: Runtime>(
    runtime: R,
    overrides: ConfigOverrides,
    source_code: &str,
    target_code: &str,
    text: Option<String>,
    install: bool,
) -> Result<()> {
    let config = Config::new(runtime, overrides)?;
    let translated = run(
        &config.backend(),
        &config.translator(),
        source_code,
        target_code,
        install,
        || match text {
            Some(text) => Ok(text),
            None => read_stdin(),
        },
    )
    .await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(translated.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// The pair is checked before any input is read.
pub(crate) async fn run<B: PackageBackend, T: Translator>(
    backend: &B,
    translator: &T,
    source_code: &str,
    target_code: &str,
    install: bool,
    read_text: impl FnOnce() -> Result<String>,
) -> Result<String> {
    ensure_pair(backend, source_code, target_code, install).await?;
    let text = read_text()?;
    translator.translate(&text, source_code, target_code)
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read text from stdin")?;
    Ok(strip_trailing_newline(&input).to_string())
}
