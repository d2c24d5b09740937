//! Package resolution - make sure a language pair is installed.
//!
//! Steps, in order, each failing fast:
//! 1. refresh the available index from the backend
//! 2. snapshot the installed set
//! 3. installed → done; otherwise look the pair up in the index
//! 4. found → install exactly once; missing → `PackageNotFound`
//!
//! Nothing here retries.

use log::{debug, info};
use std::path::PathBuf;

use crate::backend::PackageBackend;
use crate::package::{InstalledPackage, LanguagePackageDescriptor, LanguagePair};

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("Package index is unavailable")]
    IndexUnavailable(#[source] anyhow::Error),

    #[error("Could not read the installed packages")]
    Store(#[source] anyhow::Error),

    #[error("Package {pair} not found")]
    PackageNotFound { pair: LanguagePair },

    #[error("Failed to install package {pair}")]
    InstallationFailed {
        pair: LanguagePair,
        #[source]
        source: anyhow::Error,
    },
}

/// Successful outcome of [`PackageResolver::ensure_package_installed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    AlreadyInstalled(InstalledPackage),
    Installed {
        descriptor: LanguagePackageDescriptor,
        path: PathBuf,
    },
}

impl Resolution {
    pub fn was_installed_now(&self) -> bool {
        matches!(self, Resolution::Installed { .. })
    }
}

pub struct PackageResolver<'a, B: PackageBackend> {
    backend: &'a B,
}

impl<'a, B: PackageBackend> PackageResolver<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    #[tracing::instrument(skip(self))]
    pub async fn ensure_package_installed(
        &self,
        source_code: &str,
        target_code: &str,
    ) -> Result<Resolution, ResolutionError> {
        let pair = LanguagePair::new(source_code, target_code);

        let available = self
            .backend
            .update_index()
            .await
            .map_err(ResolutionError::IndexUnavailable)?;

        let installed = self
            .backend
            .installed_packages()
            .map_err(ResolutionError::Store)?;

        if let Some(package) = installed.get(&pair) {
            debug!("{} already installed at {:?}", pair, package.path);
            return Ok(Resolution::AlreadyInstalled(package.clone()));
        }

        let Some(descriptor) = available.get(&pair) else {
            return Err(ResolutionError::PackageNotFound { pair });
        };

        info!("{} package not installed. Downloading...", pair);
        let path = self.backend.install(descriptor).await.map_err(|source| {
            ResolutionError::InstallationFailed {
                pair: pair.clone(),
                source,
            }
        })?;

        Ok(Resolution::Installed {
            descriptor: descriptor.clone(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockPackageBackend;
    use crate::package::{AvailablePackageIndex, InstalledPackageSet, Package};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn descriptor(from: &str, to: &str) -> LanguagePackageDescriptor {
        LanguagePackageDescriptor {
            links: vec![format!("https://example.com/translate-{}_{}.argosmodel", from, to)],
            ..LanguagePackageDescriptor::new(from, to)
        }
    }

    fn installed_package(from: &str, to: &str) -> InstalledPackage {
        InstalledPackage {
            descriptor: LanguagePackageDescriptor::new(from, to),
            path: PathBuf::from(format!("/packages/translate-{}_{}", from, to)),
        }
    }

    fn index(pairs: &[(&str, &str)]) -> AvailablePackageIndex {
        pairs.iter().map(|(f, t)| descriptor(f, t)).collect()
    }

    fn installed(pairs: &[(&str, &str)]) -> InstalledPackageSet {
        pairs.iter().map(|(f, t)| installed_package(f, t)).collect()
    }

    fn mock_backend(
        available: &'static [(&'static str, &'static str)],
        present: &'static [(&'static str, &'static str)],
    ) -> MockPackageBackend {
        let mut backend = MockPackageBackend::new();
        backend
            .expect_update_index()
            .times(1)
            .returning(move || Ok(index(available)));
        backend
            .expect_installed_packages()
            .times(1)
            .returning(move || Ok(installed(present)));
        backend
    }

    /// In-memory store whose installs are visible to later calls.
    struct FakeBackend {
        available: AvailablePackageIndex,
        installed: Mutex<InstalledPackageSet>,
        installs: Mutex<Vec<LanguagePair>>,
    }

    impl FakeBackend {
        fn new(available: &[(&str, &str)], present: &[(&str, &str)]) -> Self {
            Self {
                available: index(available),
                installed: Mutex::new(installed(present)),
                installs: Mutex::new(Vec::new()),
            }
        }

        fn install_count(&self) -> usize {
            self.installs.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PackageBackend for FakeBackend {
        async fn update_index(&self) -> Result<AvailablePackageIndex> {
            Ok(self.available.clone())
        }

        fn installed_packages(&self) -> Result<InstalledPackageSet> {
            Ok(self.installed.lock().unwrap().clone())
        }

        async fn install(&self, descriptor: &LanguagePackageDescriptor) -> Result<PathBuf> {
            let package = installed_package(&descriptor.from_code, &descriptor.to_code);
            let path = package.path.clone();
            self.installs.lock().unwrap().push(descriptor.pair());
            self.installed.lock().unwrap().insert(package);
            Ok(path)
        }
    }

    #[tokio::test]
    async fn test_available_but_not_installed_installs_once() {
        let mut backend = mock_backend(&[("en", "es")], &[]);
        backend
            .expect_install()
            .withf(|d| d.pair() == LanguagePair::new("en", "es"))
            .times(1)
            .returning(|_| Ok(PathBuf::from("/packages/translate-en_es")));

        let resolution = PackageResolver::new(&backend)
            .ensure_package_installed("en", "es")
            .await
            .unwrap();

        assert!(resolution.was_installed_now());
        assert_eq!(
            resolution,
            Resolution::Installed {
                descriptor: descriptor("en", "es"),
                path: PathBuf::from("/packages/translate-en_es"),
            }
        );
    }

    #[tokio::test]
    async fn test_already_installed_skips_install() {
        let mut backend = mock_backend(&[("en", "es")], &[("en", "es")]);
        backend.expect_install().times(0);

        let resolution = PackageResolver::new(&backend)
            .ensure_package_installed("en", "es")
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::AlreadyInstalled(installed_package("en", "es"))
        );
    }

    #[tokio::test]
    async fn test_installed_but_no_longer_advertised_is_still_installed() {
        let mut backend = mock_backend(&[], &[("de", "en")]);
        backend.expect_install().times(0);

        let resolution = PackageResolver::new(&backend)
            .ensure_package_installed("de", "en")
            .await
            .unwrap();

        assert!(!resolution.was_installed_now());
    }

    #[tokio::test]
    async fn test_missing_everywhere_is_not_found() {
        let mut backend = mock_backend(&[("en", "fr")], &[]);
        backend.expect_install().times(0);

        let err = PackageResolver::new(&backend)
            .ensure_package_installed("en", "es")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolutionError::PackageNotFound { ref pair } if *pair == LanguagePair::new("en", "es")
        ));
        assert_eq!(err.to_string(), "Package en-es not found");
    }

    #[tokio::test]
    async fn test_reversed_pair_does_not_match() {
        let mut backend = mock_backend(&[("es", "en")], &[("es", "en")]);
        backend.expect_install().times(0);

        let result = PackageResolver::new(&backend)
            .ensure_package_installed("en", "es")
            .await;

        assert!(matches!(
            result,
            Err(ResolutionError::PackageNotFound { .. })
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_index_failure_stops_before_installed_lookup() {
        for (from, to) in [("en", "es"), ("xx", "yy"), ("", "")] {
            // installed_packages and install have no expectations: calling
            // either would panic
            let mut backend = MockPackageBackend::new();
            backend
                .expect_update_index()
                .times(1)
                .returning(|| Err(anyhow!("connection refused")));

            let err = PackageResolver::new(&backend)
                .ensure_package_installed(from, to)
                .await
                .unwrap_err();

            assert!(matches!(err, ResolutionError::IndexUnavailable(_)));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let mut backend = MockPackageBackend::new();
        backend
            .expect_update_index()
            .returning(|| Ok(index(&[("en", "es")])));
        backend
            .expect_installed_packages()
            .returning(|| Err(anyhow!("permission denied")));
        backend.expect_install().times(0);

        let err = PackageResolver::new(&backend)
            .ensure_package_installed("en", "es")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolutionError::Store(_)));
    }

    #[tokio::test]
    async fn test_install_failure_is_installation_failed() {
        let mut backend = mock_backend(&[("en", "es")], &[]);
        backend
            .expect_install()
            .times(1)
            .returning(|_| Err(anyhow!("archive is corrupt")));

        let err = PackageResolver::new(&backend)
            .ensure_package_installed("en", "es")
            .await
            .unwrap_err();

        match err {
            ResolutionError::InstallationFailed { pair, source } => {
                assert_eq!(pair, LanguagePair::new("en", "es"));
                assert_eq!(source.to_string(), "archive is corrupt");
            }
            other => panic!("expected InstallationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_call_takes_installed_path() {
        let backend = FakeBackend::new(&[("en", "es")], &[]);
        let resolver = PackageResolver::new(&backend);

        let first = resolver.ensure_package_installed("en", "es").await.unwrap();
        let second = resolver.ensure_package_installed("en", "es").await.unwrap();

        assert!(first.was_installed_now());
        assert!(!second.was_installed_now());
        assert_eq!(backend.install_count(), 1);
    }

    #[tokio::test]
    async fn test_every_available_pair_installs_its_own_descriptor() {
        let pairs = [("en", "es"), ("es", "en"), ("en", "fr"), ("de", "en")];
        let backend = FakeBackend::new(&pairs, &[("de", "en")]);
        let resolver = PackageResolver::new(&backend);

        for (from, to) in pairs {
            resolver.ensure_package_installed(from, to).await.unwrap();
        }

        let installs = backend.installs.lock().unwrap().clone();
        assert_eq!(
            installs,
            vec![
                LanguagePair::new("en", "es"),
                LanguagePair::new("es", "en"),
                LanguagePair::new("en", "fr"),
            ]
        );
    }
}
