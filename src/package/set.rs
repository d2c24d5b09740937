use log::warn;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::descriptor::{InstalledPackage, LanguagePackageDescriptor, LanguagePair, Package};

/// Packages keyed by language pair. A pair appears at most once; when the
/// input repeats a pair the first occurrence is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSet<T> {
    entries: BTreeMap<LanguagePair, T>,
}

/// Packages advertised by the remote index.
pub type AvailablePackageIndex = PackageSet<LanguagePackageDescriptor>;

/// Packages present in the local store.
pub type InstalledPackageSet = PackageSet<InstalledPackage>;

impl<T> Default for PackageSet<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Package> PackageSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package unless its pair is already present. Returns whether it
    /// was added.
    pub fn insert(&mut self, package: T) -> bool {
        match self.entries.entry(package.pair()) {
            Entry::Vacant(slot) => {
                slot.insert(package);
                true
            }
            Entry::Occupied(existing) => {
                warn!(
                    "Duplicate package for {}; keeping the first one",
                    existing.key()
                );
                false
            }
        }
    }

    pub fn get(&self, pair: &LanguagePair) -> Option<&T> {
        self.entries.get(pair)
    }

    pub fn contains(&self, pair: &LanguagePair) -> bool {
        self.entries.contains_key(pair)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Packages in pair order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<T: Package> FromIterator<T> for PackageSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for package in iter {
            set.insert(package);
        }
        set
    }
}
