//! Local storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the cart is persisted on this device
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage key of the cart line list
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.cart_key.as_str();
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(ValidationError::InvalidStorageKey);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cart_key: default_cart_key(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_cart_key() -> String {
    crate::application::DEFAULT_CART_KEY.to_string()
}
