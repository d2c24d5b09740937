use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Ordered (source, target) language pair. The identity of a package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Anything keyed by a language pair.
pub trait Package {
    fn pair(&self) -> LanguagePair;
}

/// A translation package as described by the package index or by the
/// `metadata.json` of an installed package.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LanguagePackageDescriptor {
    pub from_code: String,
    pub to_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argos_version: Option<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub package_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl LanguagePackageDescriptor {
    pub fn new(from_code: impl Into<String>, to_code: impl Into<String>) -> Self {
        Self {
            from_code: from_code.into(),
            to_code: to_code.into(),
            from_name: None,
            to_name: None,
            package_version: None,
            argos_version: None,
            package_type: None,
            links: Vec::new(),
        }
    }

    /// Translation packages either say so or leave the type out.
    pub fn is_translation(&self) -> bool {
        self.package_type
            .as_deref()
            .is_none_or(|t| t.eq_ignore_ascii_case("translate"))
    }

    /// Directory name used for the package inside the store.
    pub fn dir_name(&self) -> String {
        format!("translate-{}_{}", self.from_code, self.to_code)
    }

    /// "English → Spanish" when names are known, otherwise the pair codes.
    pub fn display_name(&self) -> String {
        match (&self.from_name, &self.to_name) {
            (Some(from), Some(to)) => format!("{} → {}", from, to),
            _ => format!("{} → {}", self.from_code, self.to_code),
        }
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let descriptor = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;
        Ok(descriptor)
    }
}

impl Package for LanguagePackageDescriptor {
    fn pair(&self) -> LanguagePair {
        LanguagePair::new(&self.from_code, &self.to_code)
    }
}

/// A package present in the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub descriptor: LanguagePackageDescriptor,
    pub path: PathBuf,
}

impl Package for InstalledPackage {
    fn pair(&self) -> LanguagePair {
        self.descriptor.pair()
    }
}
