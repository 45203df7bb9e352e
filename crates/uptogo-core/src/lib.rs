//! Shared domain types for the Uptogo shipping integration.
//!
//! Holds the settings and environment configuration, the collaborator traits
//! through which the host platform exposes orders and shipping-method
//! records, the typed delivery metadata, and the guards that gate delivery
//! creation and cancellation.

pub mod app_config;
pub mod config;
pub mod guard;
pub mod meta;
pub mod records;
pub mod sanitize;
pub mod settings;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use guard::{allow_delivery_cancel, allow_delivery_create};
pub use meta::DeliveryMeta;
pub use records::{
    find_shipping_method, MemoryOrder, MemoryShippingMethod, OrderNote, OrderRecord, Package,
    PackageItem, ShippingMethodRecord, METHOD_ID,
};
pub use sanitize::{is_blank, non_blank, sanitize_value};
pub use settings::{Settings, StoreLocation};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
