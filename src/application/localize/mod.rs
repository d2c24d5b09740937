//! Localize action - mirrors a mod's localization folder into another
//! language, translating entry texts on the way.
//!
//! Work happens in two steps so the caller can make sure the language pair
//! is installed in between: [`LocalizeAction::plan`] validates the layout and
//! asks about overwriting, [`LocalizeAction::run`] writes the new tree.

mod language;
mod line;
mod placeholder;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::runtime::Runtime;
use crate::translate::Translator;

pub use language::folder_name;
pub use line::{Entry, rewrite_header};
pub use placeholder::ProtectedText;

pub const LOCALIZATION_DIR: &str = "localization";

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeOptions {
    pub source_code: String,
    pub target_code: String,
    /// Skip the overwrite prompt.
    pub assume_yes: bool,
}

/// A validated localization job, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeJob {
    pub source_code: String,
    pub target_code: String,
    pub source_folder: String,
    pub target_folder: String,
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizePlan {
    /// The mod has no localization folder.
    NothingToLocalize,
    /// The user declined to overwrite an existing translation.
    Aborted,
    Ready(LocalizeJob),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizeReport {
    pub files_written: usize,
    pub lines_translated: usize,
    pub elapsed: Duration,
}

pub struct LocalizeAction<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> LocalizeAction<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    #[tracing::instrument(skip(self, options))]
    pub fn plan(&self, mod_dir: &Path, options: &LocalizeOptions) -> Result<LocalizePlan> {
        if !self.runtime.is_dir(mod_dir) {
            bail!("no mod found at {}", mod_dir.display());
        }

        let localization_dir = mod_dir.join(LOCALIZATION_DIR);
        if !self.runtime.is_dir(&localization_dir) {
            return Ok(LocalizePlan::NothingToLocalize);
        }

        let source_folder = folder_name(&options.source_code).to_string();
        let target_folder = folder_name(&options.target_code).to_string();
        let source_dir = localization_dir.join(&source_folder);
        let target_dir = localization_dir.join(&target_folder);

        if !self.runtime.is_dir(&source_dir) {
            bail!(
                "Mod has no {} localization at {}",
                source_folder,
                source_dir.display()
            );
        }
        if source_dir == target_dir {
            bail!("Source and target languages are the same");
        }

        if self.runtime.exists(&target_dir) && !options.assume_yes {
            let prompt = format!(
                "A {} localization already exists at {}. Overwrite it?",
                target_folder,
                target_dir.display()
            );
            if !self.runtime.confirm(&prompt)? {
                return Ok(LocalizePlan::Aborted);
            }
        }

        Ok(LocalizePlan::Ready(LocalizeJob {
            source_code: options.source_code.clone(),
            target_code: options.target_code.clone(),
            source_folder,
            target_folder,
            source_dir,
            target_dir,
        }))
    }

    /// Replace the target folder with a mirror of the source folder. Without a
    /// translator only names and headers change. The new tree is built in a
    /// sibling scratch folder and swapped in after every file is written.
    #[tracing::instrument(skip(self, translator), fields(target = %job.target_dir.display()))]
    pub fn run(&self, job: &LocalizeJob, translator: Option<&dyn Translator>) -> Result<LocalizeReport> {
        let started = Instant::now();

        let scratch_dir = scratch_dir_for(&job.target_dir)?;
        if self.runtime.exists(&scratch_dir) {
            self.runtime.remove_dir_all(&scratch_dir)?;
        }

        let mut report = LocalizeReport::default();
        if let Err(e) = self.mirror_dir(job, &job.source_dir, &scratch_dir, translator, &mut report)
        {
            if self.runtime.exists(&scratch_dir)
                && let Err(cleanup_err) = self.runtime.remove_dir_all(&scratch_dir)
            {
                warn!("Failed to remove {:?}: {}", scratch_dir, cleanup_err);
            }
            return Err(e);
        }

        if self.runtime.exists(&job.target_dir) {
            debug!("Replacing existing {:?}", job.target_dir);
            self.runtime.remove_dir_all(&job.target_dir)?;
        }
        self.runtime.rename(&scratch_dir, &job.target_dir)?;

        report.elapsed = started.elapsed();
        info!(
            "Localized {} file(s), {} line(s) translated",
            report.files_written, report.lines_translated
        );
        Ok(report)
    }

    fn mirror_dir(
        &self,
        job: &LocalizeJob,
        source: &Path,
        target: &Path,
        translator: Option<&dyn Translator>,
        report: &mut LocalizeReport,
    ) -> Result<()> {
        self.runtime.create_dir_all(target)?;

        let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) = self
            .runtime
            .read_dir(source)?
            .into_iter()
            .partition(|path| self.runtime.is_dir(path));

        for file in files {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = format!("{}.yml", stem.replace(&job.source_folder, &job.target_folder));
            self.localize_file(job, &file, &target.join(name), translator, report)?;
        }

        for dir in dirs {
            let name = dir
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let target_dir = target.join(name.replace(&job.source_folder, &job.target_folder));
            self.mirror_dir(job, &dir, &target_dir, translator, report)?;
        }

        Ok(())
    }

    fn localize_file(
        &self,
        job: &LocalizeJob,
        source: &Path,
        target: &Path,
        translator: Option<&dyn Translator>,
        report: &mut LocalizeReport,
    ) -> Result<()> {
        debug!("Localizing {:?} -> {:?}", source, target);
        let content = self.runtime.read_to_string(source)?;
        let content = content.strip_prefix(BOM).unwrap_or(&content);

        let mut output = String::with_capacity(content.len() + BOM.len_utf8());
        output.push(BOM);

        for (i, line) in content.lines().enumerate() {
            let line = if i == 0 {
                rewrite_header(line, &job.source_folder, &job.target_folder)
            } else {
                line.to_string()
            };

            let translated = match (translator, Entry::parse(&line)) {
                (Some(translator), Some(entry)) if !entry.text.trim().is_empty() => {
                    let protected = ProtectedText::protect(entry.text);
                    let translated = translator
                        .translate(&protected.text, &job.source_code, &job.target_code)
                        .with_context(|| {
                            format!("Failed to translate {} in {}", entry.key, source.display())
                        })?;
                    report.lines_translated += 1;
                    Some(entry.render(&protected.restore(&translated)))
                }
                _ => None,
            };

            output.push_str(translated.as_deref().unwrap_or(&line));
            output.push('\n');
        }

        self.runtime.write(target, output.as_bytes())?;
        report.files_written += 1;
        Ok(())
    }
}

/// Returns: `<localization>/.<target>_tmp`
fn scratch_dir_for(target_dir: &Path) -> Result<PathBuf> {
    let name = target_dir
        .file_name()
        .with_context(|| format!("Invalid localization folder {:?}", target_dir))?;
    Ok(target_dir.with_file_name(format!(".{}_tmp", name.to_string_lossy())))
}
