//! Delivery quoting and delivery lifecycle for the Uptogo shipping method.
//!
//! [`ShippingService::calculate_shipping`] turns a package into rate offers by
//! geocoding the destination, routing from the store, registering a delivery
//! request with its merchandise and listing the quoted rates.
//! [`ShippingService::delivery_create`] and [`ShippingService::delivery_cancel`]
//! move a shipping line between "no delivery" and "delivery active".
//!
//! Remote failures never reach the shopper: each entry point swallows them,
//! logs the failing stage through `tracing`, and behaves as if the step did
//! not happen.

pub mod actions;
pub mod delivery;
pub mod error;
pub mod format;
pub mod lock;
pub mod quote;
pub mod routing;
pub mod service;
pub mod settings;

pub use actions::{available_action, OrderAction};
pub use delivery::DeliveryOutcome;
pub use error::{ShippingError, Stage};
pub use quote::{RateMeta, RateSink, ShippingRate};
pub use service::ShippingService;
pub use settings::save_settings;
