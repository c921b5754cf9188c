//! Command implementations.
//!
//! Each command returns the data to print; `main` renders it as JSON.

pub mod cart;
pub mod catalog;
pub mod storage;
pub mod wishlist;

use std::path::PathBuf;

use quickmart_storefront::services::Latency;
use quickmart_storefront::services::catalog::{CatalogData, CatalogError, CatalogService};
use quickmart_storefront::storage::{DeviceStorage, StorageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid {0}: {1}")]
    InvalidArgument(&'static str, String),
}

/// Where commands find the device storage and catalog.
pub struct Context {
    storage: DeviceStorage,
    catalog_path: Option<PathBuf>,
}

impl Context {
    pub fn new(data_dir: PathBuf, catalog_path: Option<PathBuf>) -> Self {
        Self::with_storage(DeviceStorage::file(data_dir), catalog_path)
    }

    pub const fn with_storage(storage: DeviceStorage, catalog_path: Option<PathBuf>) -> Self {
        Self {
            storage,
            catalog_path,
        }
    }

    pub const fn storage(&self) -> &DeviceStorage {
        &self.storage
    }

    /// The catalog without simulated latency.
    pub async fn catalog(&self) -> Result<CatalogService, CliError> {
        let data = match &self.catalog_path {
            Some(path) => CatalogData::from_path(path).await?,
            None => CatalogData::embedded()?,
        };
        Ok(CatalogService::new(data, Latency::none()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn memory_context() -> Context {
        Context::with_storage(DeviceStorage::memory(), None)
    }
}
