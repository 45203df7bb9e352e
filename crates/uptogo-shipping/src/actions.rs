//! Which delivery action an order's admin screen should offer.

use uptogo_core::meta::REQUEST_KEY;
use uptogo_core::records::ShippingMethodRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    RequestDelivery,
    CancelDelivery,
}

impl OrderAction {
    /// Identifier the host registers the action under.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            OrderAction::RequestDelivery => "uptogo_delivery_create",
            OrderAction::CancelDelivery => "uptogo_delivery_cancel",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OrderAction::RequestDelivery => "Request delivery",
            OrderAction::CancelDelivery => "Cancel delivery",
        }
    }
}

/// Cancel while a delivery is active, request otherwise. Orders not shipped
/// with this method get no action.
pub fn available_action<M>(shipping: Option<&M>) -> Option<OrderAction>
where
    M: ShippingMethodRecord + ?Sized,
{
    let shipping = shipping?;
    if shipping.meta_exists(REQUEST_KEY) {
        Some(OrderAction::CancelDelivery)
    } else {
        Some(OrderAction::RequestDelivery)
    }
}

#[cfg(test)]
mod tests {
    use uptogo_core::{find_shipping_method, MemoryShippingMethod};

    use super::*;

    #[test]
    fn no_shipping_line_offers_nothing() {
        assert_eq!(available_action::<MemoryShippingMethod>(None), None);
    }

    #[test]
    fn active_delivery_offers_cancel() {
        let mut method = MemoryShippingMethod::uptogo();
        method.set_meta(REQUEST_KEY, "D-1");
        let action = available_action(Some(&method)).unwrap();
        assert_eq!(action, OrderAction::CancelDelivery);
        assert_eq!(action.id(), "uptogo_delivery_cancel");
        assert_eq!(action.label(), "Cancel delivery");
    }

    #[test]
    fn fresh_line_offers_request() {
        let method = MemoryShippingMethod::uptogo();
        let action = available_action(Some(&method)).unwrap();
        assert_eq!(action, OrderAction::RequestDelivery);
        assert_eq!(action.id(), "uptogo_delivery_create");
    }

    #[test]
    fn other_methods_are_ignored() {
        let mut methods = vec![MemoryShippingMethod {
            method_id: "flat_rate".to_owned(),
            ..MemoryShippingMethod::default()
        }];
        let found = find_shipping_method(&mut methods);
        assert_eq!(available_action(found.as_deref()), None);
    }
}
