//! Preconditions for the delivery order actions.
//!
//! Both guards re-derive state from the shipping-method metadata on every
//! call. A failed guard turns the action into a no-op, which is what keeps a
//! double-clicked action from creating two deliveries.

use crate::meta::DeliveryMeta;
use crate::records::{OrderRecord, ShippingMethodRecord};
use crate::sanitize::is_blank;
use crate::settings::Settings;

/// A delivery may be requested: settings are usable, the order has a
/// non-blank destination postcode, a rate was selected at checkout and no delivery is
/// active yet.
pub fn allow_delivery_create<O, M>(settings: &Settings, order: &O, shipping: Option<&M>) -> bool
where
    O: OrderRecord + ?Sized,
    M: ShippingMethodRecord + ?Sized,
{
    let Some(shipping) = shipping else {
        return false;
    };
    let meta = DeliveryMeta::load(shipping);
    settings.is_valid()
        && !is_blank(order.shipping_postcode())
        && !meta.has_active_delivery()
        && meta.has_selected_rate()
}

/// An active delivery exists and may be cancelled.
pub fn allow_delivery_cancel<M>(settings: &Settings, shipping: Option<&M>) -> bool
where
    M: ShippingMethodRecord + ?Sized,
{
    let Some(shipping) = shipping else {
        return false;
    };
    settings.is_valid() && DeliveryMeta::load(shipping).has_active_delivery()
}
