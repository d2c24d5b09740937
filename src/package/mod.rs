//! Package management module
//!
//! Language package descriptors, the keyed package sets built from them, and
//! the local package store.

mod descriptor;
mod repository;
mod set;

pub use descriptor::{InstalledPackage, LanguagePackageDescriptor, LanguagePair, Package};
pub use repository::{METADATA_FILE, PackageRepository};
pub use set::{AvailablePackageIndex, InstalledPackageSet, PackageSet};
