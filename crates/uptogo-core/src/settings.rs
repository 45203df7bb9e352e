//! Integration settings managed by the host platform.

use serde::{Deserialize, Serialize};

use crate::sanitize::is_blank;

/// The three settings the integration needs before it can talk to Uptogo.
///
/// `store_id` and `store_location` are normally filled in from the customer
/// record returned for `api_key` when the settings are saved.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub store_id: String,
    /// `"lat,lng"` as returned by the customer lookup.
    pub store_location: String,
}

impl Settings {
    /// All three fields are non-blank.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !is_blank(&self.api_key) && !is_blank(&self.store_id) && !is_blank(&self.store_location)
    }

    /// Splits `store_location` into its latitude and longitude tokens.
    ///
    /// Tokens are passed through without numeric validation. Returns `None`
    /// when there is no comma, since no longitude can be derived.
    #[must_use]
    pub fn store_coordinates(&self) -> Option<StoreLocation> {
        let mut parts = self.store_location.split(',');
        let lat = parts.next()?;
        let lng = parts.next()?;
        Some(StoreLocation {
            lat: lat.to_owned(),
            lng: lng.to_owned(),
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[redacted]")
            .field("store_id", &self.store_id)
            .field("store_location", &self.store_location)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub lat: String,
    pub lng: String,
}
