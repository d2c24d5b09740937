use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::path::PathBuf;

use crate::{
    backend::LocalBackend,
    http::HttpClient,
    package::PackageRepository,
    runtime::Runtime,
    translate::{CommandTranslator, DEFAULT_TRANSLATOR},
};

use super::paths::{DEFAULT_INDEX_URL, default_cache_dir, default_package_root, normalize_index_url};

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub packages_dir: Option<PathBuf>,
    pub index_url: Option<String>,
    pub translator: Option<String>,
    pub device: Option<String>,
}

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub http_client: HttpClient,
    pub package_root: PathBuf,
    pub cache_dir: PathBuf,
    pub index_url: String,
    pub translator: String,
    pub device: Option<String>,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, overrides: ConfigOverrides) -> Result<Self> {
        let package_root = match overrides.packages_dir {
            Some(path) => path,
            None => default_package_root(&runtime)?,
        };
        let cache_dir = default_cache_dir(&runtime)?;
        let index_url = normalize_index_url(
            overrides
                .index_url
                .as_deref()
                .unwrap_or(DEFAULT_INDEX_URL),
        );

        debug!("Package root: {:?}", package_root);
        debug!("Package index: {}", index_url);

        let client = Client::builder()
            .user_agent(format!("langpm/{}", env!("LANGPM_VERSION")))
            .build()?;

        Ok(Self {
            runtime,
            http_client: HttpClient::new(client),
            package_root,
            cache_dir,
            index_url,
            translator: overrides
                .translator
                .unwrap_or_else(|| DEFAULT_TRANSLATOR.to_string()),
            device: overrides.device,
        })
    }

    pub fn backend(&self) -> LocalBackend<'_, R> {
        LocalBackend::new(
            &self.runtime,
            self.http_client.clone(),
            self.index_url.clone(),
            self.package_root.clone(),
            &self.cache_dir,
        )
    }

    pub fn repository(&self) -> PackageRepository<'_, R> {
        PackageRepository::new(&self.runtime, self.package_root.clone())
    }

    pub fn translator(&self) -> CommandTranslator<'_, R> {
        CommandTranslator::new(&self.runtime, self.translator.clone(), self.device.clone())
    }
}
