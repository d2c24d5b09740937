//! Localization file lines of the form ` key:0 "Text"`.

use regex::Regex;
use std::sync::LazyLock;

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s+)([\w.-]+:)(\d+)?(\s+)"(.*?)"\s*$"#)
        .expect("localization entry regex should compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    pub indent: &'a str,
    pub key: &'a str,
    pub version: Option<&'a str>,
    pub separator: &'a str,
    pub text: &'a str,
}

impl<'a> Entry<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = ENTRY_PATTERN.captures(line)?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();

        Some(Self {
            indent: group(1),
            key: group(2),
            version: caps.get(3).map(|m| m.as_str()),
            separator: group(4),
            text: group(5),
        })
    }

    /// Rebuild the line with a different text and everything else kept.
    pub fn render(&self, text: &str) -> String {
        format!(
            "{}{}{}{}\"{}\"",
            self.indent,
            self.key,
            self.version.unwrap_or_default(),
            self.separator,
            text
        )
    }
}

/// Rewrite the `l_<language>:` header of a file.
pub fn rewrite_header(line: &str, source_folder: &str, target_folder: &str) -> String {
    line.replace(
        &format!("l_{}:", source_folder),
        &format!("l_{}:", target_folder),
    )
}
