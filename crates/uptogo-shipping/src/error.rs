use std::fmt;

use thiserror::Error;
use uptogo_client::UptogoError;

/// Step of a quoting or delivery chain that can come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PlaceSuggestions,
    PlaceDetails,
    Directions,
    DeliveryRequest,
    Rates,
    Rate,
    DeliveryCreate,
    DeliveryCancel,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PlaceSuggestions => "place suggestions",
            Stage::PlaceDetails => "place details",
            Stage::Directions => "directions",
            Stage::DeliveryRequest => "delivery request",
            Stage::Rates => "rates",
            Stage::Rate => "selected rate",
            Stage::DeliveryCreate => "delivery create",
            Stage::DeliveryCancel => "delivery cancel",
        };
        f.write_str(name)
    }
}

/// Why a quoting or delivery chain stopped.
#[derive(Debug, Error)]
pub enum ShippingError {
    #[error("Uptogo API error: {0}")]
    Api(#[from] UptogoError),

    /// The API answered, but with nothing usable for this stage.
    #[error("{0} came back empty")]
    Aborted(Stage),

    #[error("settings are incomplete")]
    InvalidSettings,

    #[error("store location '{0}' is not a 'lat,lng' pair")]
    InvalidStoreLocation(String),

    #[error("failed to load shipping metadata: {0}")]
    Load(String),

    /// The remote call succeeded but the metadata recording it was not
    /// saved. `delivery_id` is live on the Uptogo side.
    #[error("delivery {delivery_id} is active but its metadata was not saved: {reason}")]
    Persist { delivery_id: String, reason: String },

    /// The only error shown to shop staff: raised when settings are saved
    /// with an API key Uptogo does not know.
    #[error("Access key not found.")]
    AccessKeyNotFound,
}

impl ShippingError {
    /// Remote delivery left behind by a failed save, if any.
    #[must_use]
    pub fn delivery_id(&self) -> Option<&str> {
        match self {
            ShippingError::Persist { delivery_id, .. } => Some(delivery_id),
            _ => None,
        }
    }
}
