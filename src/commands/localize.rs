use anyhow::Result;
use std::path::PathBuf;

use crate::{
    application::{LocalizeAction, LocalizeOptions, LocalizePlan, LocalizeReport},
    runtime::Runtime,
    translate::CachedTranslator,
};

use super::{
    config::{Config, ConfigOverrides},
    ensure_pair,
};

#[derive(Debug, Clone)]
pub struct LocalizeArgs {
    pub mod_dir: PathBuf,
    pub source_code: String,
    pub target_code: String,
    /// Only copy and rename; leave texts untouched.
    pub no_translate: bool,
    pub assume_yes: bool,
    /// Install the language pair if it is missing.
    pub install: bool,
}

/// Mirror a mod's localization folder into another language.
#[tracing::instrument(skip(runtime, overrides))]
pub async fn localize<R: Runtime>(
    runtime: R,
    overrides: ConfigOverrides,
    args: LocalizeArgs,
) -> Result<()> {
    let config = Config::new(runtime, overrides)?;
    let action = LocalizeAction::new(&config.runtime);

    let options = LocalizeOptions {
        source_code: args.source_code.clone(),
        target_code: args.target_code.clone(),
        assume_yes: args.assume_yes,
    };
    let job = match action.plan(&args.mod_dir, &options)? {
        LocalizePlan::NothingToLocalize => {
            println!("Nothing to localize.");
            return Ok(());
        }
        LocalizePlan::Aborted => {
            println!("Aborted, existing localization left untouched.");
            return Ok(());
        }
        LocalizePlan::Ready(job) => job,
    };

    let report = if args.no_translate {
        action.run(&job, None)?
    } else {
        ensure_pair(
            &config.backend(),
            &args.source_code,
            &args.target_code,
            args.install,
        )
        .await?;
        let translator = CachedTranslator::new(config.translator());
        action.run(&job, Some(&translator))?
    };

    println!("{}", summary(&report, &job.target_dir));
    Ok(())
}

fn summary(report: &LocalizeReport, target_dir: &std::path::Path) -> String {
    format!(
        "Wrote {} file(s) to {}, {} line(s) translated in {:.1}s",
        report.files_written,
        target_dir.display(),
        report.lines_translated,
        report.elapsed.as_secs_f64()
    )
}
