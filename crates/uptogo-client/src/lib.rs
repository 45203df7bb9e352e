//! HTTP client for the Uptogo logistics API.
//!
//! Covers the customer lookup used when settings are saved, the geocoding
//! and routing endpoints, delivery-request quoting, and delivery order
//! creation and cancellation.

pub mod client;
pub mod error;
pub mod orders;
pub mod places;
pub mod quotes;
pub mod types;

pub use client::UptogoClient;
pub use error::UptogoError;
pub use types::{
    Customer, DeliveryOrder, DeliveryPoint, Directions, GeoPoint, Merchandise, Modality,
    PlaceAddress, PlaceDetails, PlaceSuggestion, Rate, StoreCoordinates,
};
