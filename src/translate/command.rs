use anyhow::{Result, bail};
use log::debug;

use crate::runtime::Runtime;

use super::{Translator, strip_trailing_newline};

pub const DEFAULT_TRANSLATOR: &str = "argos-translate";

/// Environment variable the engine reads to pick cpu/cuda/auto.
const DEVICE_ENV: &str = "ARGOS_DEVICE_TYPE";

/// Runs `<program> --from-lang <src> --to-lang <tgt> -- <text>` and returns
/// its standard output.
pub struct CommandTranslator<'a, R: Runtime> {
    runtime: &'a R,
    program: String,
    device: Option<String>,
}

impl<'a, R: Runtime> CommandTranslator<'a, R> {
    pub fn new(runtime: &'a R, program: impl Into<String>, device: Option<String>) -> Self {
        Self {
            runtime,
            program: program.into(),
            device,
        }
    }
}

impl<R: Runtime> Translator for CommandTranslator<'_, R> {
    #[tracing::instrument(skip(self, text))]
    fn translate(&self, text: &str, source_code: &str, target_code: &str) -> Result<String> {
        let args = vec![
            "--from-lang".to_string(),
            source_code.to_string(),
            "--to-lang".to_string(),
            target_code.to_string(),
            // text such as "-10%" must not be read as an option
            "--".to_string(),
            text.to_string(),
        ];
        let envs: Vec<(String, String)> = self
            .device
            .iter()
            .map(|device| (DEVICE_ENV.to_string(), device.clone()))
            .collect();

        debug!("Translating {} chars with {}", text.len(), self.program);
        let output = self.runtime.run_command(&self.program, &args, &envs)?;

        if !output.success {
            let code = output
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            bail!(
                "{} exited with {}: {}",
                self.program,
                code,
                output.stderr.trim()
            );
        }

        Ok(strip_trailing_newline(&output.stdout).to_string())
    }
}
