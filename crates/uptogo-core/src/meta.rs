//! Typed view over the delivery metadata stored on a shipping-method record.
//!
//! The host shows these entries to shop staff, so they are stored under
//! human-readable labels rather than internal keys.

use crate::records::ShippingMethodRecord;

pub const INVENTORY_KEY: &str = "Inventory";
pub const PROPOSAL_KEY: &str = "Proposal";
pub const REQUEST_KEY: &str = "Request";
pub const WARNING_KEY: &str = "Warning";

/// Delivery state of one shipping line.
///
/// `inventory_id` and `proposal_id` are set when the customer picks a rate at
/// checkout; `request_id` exists exactly while a delivery order is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryMeta {
    pub inventory_id: Option<String>,
    pub proposal_id: Option<String>,
    pub request_id: Option<String>,
    pub warning: Option<String>,
}

impl DeliveryMeta {
    #[must_use]
    pub fn load<M: ShippingMethodRecord + ?Sized>(record: &M) -> Self {
        let get = |key: &str| record.meta(key).map(str::to_owned);
        Self {
            inventory_id: get(INVENTORY_KEY),
            proposal_id: get(PROPOSAL_KEY),
            request_id: get(REQUEST_KEY),
            warning: get(WARNING_KEY),
        }
    }

    /// Writes every field onto `record`, deleting keys whose field is `None`.
    ///
    /// Does not call `save_meta`; the caller decides when to persist.
    pub fn apply<M: ShippingMethodRecord + ?Sized>(&self, record: &mut M) {
        let fields = [
            (INVENTORY_KEY, &self.inventory_id),
            (PROPOSAL_KEY, &self.proposal_id),
            (REQUEST_KEY, &self.request_id),
            (WARNING_KEY, &self.warning),
        ];
        for (key, value) in fields {
            match value {
                Some(v) => record.set_meta(key, v),
                None => record.delete_meta(key),
            }
        }
    }

    /// A rate was chosen during checkout.
    #[must_use]
    pub fn has_selected_rate(&self) -> bool {
        self.inventory_id.is_some() && self.proposal_id.is_some()
    }

    #[must_use]
    pub fn has_active_delivery(&self) -> bool {
        self.request_id.is_some()
    }
}
