//! Translation engine seam.
//!
//! Inference happens in an external program; [`CommandTranslator`] runs it
//! once per text. [`CachedTranslator`] remembers results for the duration of
//! a run.

mod cache;
mod command;

use anyhow::Result;

pub use cache::CachedTranslator;
pub use command::{CommandTranslator, DEFAULT_TRANSLATOR};

#[cfg_attr(test, mockall::automock)]
pub trait Translator {
    fn translate(&self, text: &str, source_code: &str, target_code: &str) -> Result<String>;
}

/// Drop one trailing `\n` or `\r\n`, nothing more.
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
