//! Resolving the store behind an API key when the settings are saved.

use uptogo_client::UptogoClient;
use uptogo_core::Settings;

use crate::error::ShippingError;

/// Looks up the store that owns `api_key` and returns complete settings
/// for it.
///
/// # Errors
///
/// Returns [`ShippingError::AccessKeyNotFound`] when the key is unknown or
/// the lookup fails. The underlying cause is only logged.
pub async fn save_settings(client: &UptogoClient, api_key: &str) -> Result<Settings, ShippingError> {
    match client.customer_by_api_key(api_key).await {
        Ok(Some(customer)) => {
            tracing::info!(store_id = %customer.id, "api key resolved");
            Ok(Settings {
                api_key: api_key.to_owned(),
                store_id: customer.id,
                store_location: customer.location,
            })
        }
        Ok(None) => Err(ShippingError::AccessKeyNotFound),
        Err(e) => {
            tracing::warn!(error = %e, "api key lookup failed");
            Err(ShippingError::AccessKeyNotFound)
        }
    }
}
