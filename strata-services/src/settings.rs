// SPDX-License-Identifier: LGPL-3.0-only
use crate::host::{HostError, SettingsHost};
use crate::places::KnownFolder;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::rc::Rc;
use strata_core::transaction::Transaction;
use thiserror::Error;

/// Errors raised by [SettingsSession].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The host settings could not be read.
    #[error("Failed to load settings: {0}")]
    Load(HostError),

    /// The host rejected an update; the local value was restored.
    #[error("Failed to update setting {key}: {source}")]
    Update {
        /// Setting that was updated.
        key: String,
        /// The host's error.
        source: HostError,
    },
}

/// Local view of the host settings with optimistic updates.
///
/// An update is visible right away and rolled back if the host rejects it.
pub struct SettingsSession<H: SettingsHost + ?Sized> {
    host: Rc<H>,
    values: Map<String, Value>,
}

impl<H: SettingsHost + ?Sized> SettingsSession<H> {
    /// Read every setting from the host.
    pub async fn load(host: Rc<H>) -> Result<Self, SettingsError> {
        let values = host.get_all().await.map_err(SettingsError::Load)?;
        log::debug!("Loaded {} settings", values.len());
        Ok(Self { host, values })
    }

    /// Every setting.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Value of `key` deserialized as `T`. `None` when missing or of another type.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Store `value` under `key`.
    pub async fn update(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut tx = Transaction::begin(&mut self.values);
        tx.apply(|values| {
            values.insert(key.to_string(), value.clone());
        });

        match self.host.update(key, value).await {
            Ok(()) => {
                tx.commit();
                Ok(())
            },
            Err(source) => {
                tx.rollback();
                log::warn!("Setting {} reverted: {}", key, source);
                Err(SettingsError::Update {
                    key: key.to_string(),
                    source,
                })
            },
        }
    }

    /// Path of a known folder as configured by the host.
    pub async fn known_folder(&self, folder: KnownFolder) -> Option<String> {
        match self.host.get_known_folder(folder).await {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Failed to resolve {}: {}", folder, e);
                None
            },
        }
    }
}
