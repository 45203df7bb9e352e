//! Entry point tying the API client to the integration settings.

use uptogo_client::UptogoClient;
use uptogo_core::{AppConfig, Settings, StoreLocation};

use crate::error::ShippingError;
use crate::lock::OrderLocks;

/// Runs quoting and delivery actions for one configured store.
///
/// Holds no per-order state apart from the per-order locks; everything
/// else is re-read from the records passed to each call.
pub struct ShippingService {
    pub(crate) client: UptogoClient,
    pub(crate) settings: Settings,
    pub(crate) app_base_url: String,
    pub(crate) locks: OrderLocks,
}

impl ShippingService {
    #[must_use]
    pub fn new(client: UptogoClient, settings: Settings, app_base_url: &str) -> Self {
        Self {
            client,
            settings,
            app_base_url: app_base_url.to_owned(),
            locks: OrderLocks::default(),
        }
    }

    /// Builds the service from loaded configuration, authenticating with the
    /// configured API key.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Api`] if the HTTP client cannot be built or
    /// the API base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ShippingError> {
        let client = UptogoClient::with_base_url(
            &config.settings.api_key,
            config.request_timeout_secs,
            &config.api_base_url,
        )?;
        Ok(Self::new(
            client,
            config.settings.clone(),
            &config.app_base_url,
        ))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn client(&self) -> &UptogoClient {
        &self.client
    }

    pub(crate) fn store_location(&self) -> Result<StoreLocation, ShippingError> {
        self.settings
            .store_coordinates()
            .ok_or_else(|| ShippingError::InvalidStoreLocation(self.settings.store_location.clone()))
    }
}
