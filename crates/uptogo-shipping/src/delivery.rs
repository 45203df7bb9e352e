//! Delivery order lifecycle: request a delivery for the rate chosen at
//! checkout, or cancel the active one.
//!
//! A shipping line has an active delivery exactly when its `"Request"`
//! metadata is set. Both actions hold the order's lock from the guard check
//! to the metadata write.

use uptogo_client::{DeliveryOrder, DeliveryPoint, PlaceDetails, Rate, StoreCoordinates};
use uptogo_core::meta::REQUEST_KEY;
use uptogo_core::records::{OrderRecord, ShippingMethodRecord};
use uptogo_core::sanitize::non_blank;
use uptogo_core::{allow_delivery_cancel, allow_delivery_create, DeliveryMeta, StoreLocation};

use crate::error::{ShippingError, Stage};
use crate::format::{
    extract_number_from_address, format_assignment, format_contact_name, format_delivery_link,
};
use crate::service::ShippingService;

/// Payment method code for "billed to the store account".
const PAYMENT_METHOD_ACCOUNT: u32 = 3;

/// Result of a delivery action, for hosts that want to report it.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Created(String),
    Cancelled(String),
    /// The guard refused the action; nothing was sent.
    Skipped,
    /// The action started but a remote step failed or came back empty.
    Aborted(ShippingError),
}

impl ShippingService {
    /// Requests a delivery for the rate the customer selected at checkout.
    ///
    /// The shipping line is reloaded after the order's lock is taken, so a
    /// delivery created by a concurrent call is seen by the guard. On success
    /// the delivery id is stored as `"Request"` metadata and an order note
    /// with the tracking link is added. A refused guard or a failed remote
    /// call leaves both records untouched.
    pub async fn delivery_create<O, M>(
        &self,
        order: &mut O,
        shipping: Option<&mut M>,
    ) -> DeliveryOutcome
    where
        O: OrderRecord + ?Sized,
        M: ShippingMethodRecord + ?Sized,
    {
        let _lock = self.locks.lock(order.id()).await;

        let Some(shipping) = shipping else {
            tracing::debug!(order_id = order.id(), "order has no uptogo shipping line");
            return DeliveryOutcome::Skipped;
        };
        if let Err(e) = shipping.reload_meta() {
            let e = ShippingError::Load(e.to_string());
            tracing::warn!(order_id = order.id(), error = %e, "delivery create aborted");
            return DeliveryOutcome::Aborted(e);
        }
        if !allow_delivery_create(&self.settings, &*order, Some(&*shipping)) {
            tracing::debug!(order_id = order.id(), "delivery create not allowed");
            return DeliveryOutcome::Skipped;
        }

        match self.try_delivery_create(order, shipping).await {
            Ok(id) => {
                tracing::info!(order_id = order.id(), delivery_id = %id, "delivery requested");
                DeliveryOutcome::Created(id)
            }
            Err(e) => {
                tracing::warn!(
                    order_id = order.id(),
                    delivery_id = e.delivery_id().unwrap_or_default(),
                    error = %e,
                    "delivery create aborted"
                );
                DeliveryOutcome::Aborted(e)
            }
        }
    }

    /// Cancels the active delivery of a shipping line.
    ///
    /// Like [`Self::delivery_create`], the line is reloaded under the order's
    /// lock before the guard runs. On success the `"Request"` metadata is
    /// removed and an order note is added. Cancelling a line with no active
    /// delivery does nothing.
    pub async fn delivery_cancel<O, M>(
        &self,
        order: &mut O,
        shipping: Option<&mut M>,
    ) -> DeliveryOutcome
    where
        O: OrderRecord + ?Sized,
        M: ShippingMethodRecord + ?Sized,
    {
        let _lock = self.locks.lock(order.id()).await;

        let Some(shipping) = shipping else {
            tracing::debug!(order_id = order.id(), "order has no uptogo shipping line");
            return DeliveryOutcome::Skipped;
        };
        if let Err(e) = shipping.reload_meta() {
            let e = ShippingError::Load(e.to_string());
            tracing::warn!(order_id = order.id(), error = %e, "delivery cancel aborted");
            return DeliveryOutcome::Aborted(e);
        }
        if !allow_delivery_cancel(&self.settings, Some(&*shipping)) {
            tracing::debug!(order_id = order.id(), "delivery cancel not allowed");
            return DeliveryOutcome::Skipped;
        }

        match self.try_delivery_cancel(order, shipping).await {
            Ok(id) => {
                tracing::info!(order_id = order.id(), delivery_id = %id, "delivery cancelled");
                DeliveryOutcome::Cancelled(id)
            }
            Err(e) => {
                tracing::warn!(
                    order_id = order.id(),
                    delivery_id = e.delivery_id().unwrap_or_default(),
                    error = %e,
                    "delivery cancel aborted"
                );
                DeliveryOutcome::Aborted(e)
            }
        }
    }

    async fn try_delivery_create<O, M>(
        &self,
        order: &mut O,
        shipping: &mut M,
    ) -> Result<String, ShippingError>
    where
        O: OrderRecord + ?Sized,
        M: ShippingMethodRecord + ?Sized,
    {
        let meta = DeliveryMeta::load(shipping);
        let (Some(inventory_id), Some(proposal_id)) =
            (meta.inventory_id.as_deref(), meta.proposal_id.as_deref())
        else {
            return Err(ShippingError::Aborted(Stage::Rate));
        };
        let store = self.store_location()?;

        let place = self.resolve_place(order.shipping_postcode()).await?;
        let rate = self
            .client
            .rate(inventory_id, proposal_id)
            .await?
            .ok_or(ShippingError::Aborted(Stage::Rate))?;

        let delivery = build_delivery_order(&self.settings.store_id, &store, &*order, &rate, &place);
        let delivery_id = self
            .client
            .create_delivery(&delivery)
            .await?
            .ok_or(ShippingError::Aborted(Stage::DeliveryCreate))?;

        order.add_order_note(&format!(
            "Delivery number {} has been requested.",
            format_delivery_link(&self.app_base_url, &delivery_id)
        ));
        shipping.set_meta(REQUEST_KEY, &delivery_id);
        if let Err(e) = shipping.save_meta() {
            return Err(ShippingError::Persist {
                delivery_id,
                reason: e.to_string(),
            });
        }
        Ok(delivery_id)
    }

    async fn try_delivery_cancel<O, M>(
        &self,
        order: &mut O,
        shipping: &mut M,
    ) -> Result<String, ShippingError>
    where
        O: OrderRecord + ?Sized,
        M: ShippingMethodRecord + ?Sized,
    {
        let Some(delivery_id) = DeliveryMeta::load(shipping).request_id else {
            return Err(ShippingError::Aborted(Stage::DeliveryCancel));
        };
        if !self.client.cancel_delivery(&delivery_id).await? {
            return Err(ShippingError::Aborted(Stage::DeliveryCancel));
        }

        order.add_order_note(&format!(
            "Delivery number {} has been cancelled.",
            format_delivery_link(&self.app_base_url, &delivery_id)
        ));
        shipping.delete_meta(REQUEST_KEY);
        if let Err(e) = shipping.save_meta() {
            return Err(ShippingError::Persist {
                delivery_id,
                reason: e.to_string(),
            });
        }
        Ok(delivery_id)
    }
}

/// Assembles the delivery order for `rate`, dropping off at `place`.
pub(crate) fn build_delivery_order<O: OrderRecord + ?Sized>(
    store_id: &str,
    store: &StoreLocation,
    order: &O,
    rate: &Rate,
    place: &PlaceDetails,
) -> DeliveryOrder {
    let point = DeliveryPoint {
        label: "0".to_owned(),
        invert: false,
        assignment: format_assignment(order),
        contact_name: format_contact_name(order),
        notify: non_blank(order.billing_email()).map(str::to_owned),
        location: place.location.clone(),
        address: place.address.with_number(
            extract_number_from_address(order.shipping_address_1()),
            non_blank(order.shipping_address_2()),
        ),
    };
    DeliveryOrder {
        store_id: store_id.to_owned(),
        rate_id: rate.id.clone(),
        distance: 0,
        ecommerce: true,
        store_location: StoreCoordinates {
            lat: store.lat.clone(),
            lng: store.lng.clone(),
        },
        payment_method: PAYMENT_METHOD_ACCOUNT,
        points: vec![point],
        duration_minutes: rate.lead_time_days.saturating_mul(24 * 60),
        price: rate.price,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use uptogo_core::MemoryOrder;

    use super::*;

    fn order() -> MemoryOrder {
        MemoryOrder {
            id: "1001".to_owned(),
            shipping_postcode: "01310-100".to_owned(),
            shipping_first_name: "Ana".to_owned(),
            shipping_last_name: "Souza".to_owned(),
            shipping_address_1: "Avenida Paulista, 1578".to_owned(),
            shipping_address_2: " ".to_owned(),
            billing_phone: "11 98888-7777".to_owned(),
            billing_email: "ana@example.com".to_owned(),
            ..MemoryOrder::default()
        }
    }

    fn rate() -> Rate {
        serde_json::from_value(json!({
            "Id": "A",
            "Preco": 10,
            "Prazo": 2,
            "Modalidade": { "Id": 1, "Nome": "Carro" }
        }))
        .unwrap()
    }

    fn place() -> PlaceDetails {
        serde_json::from_value(json!({
            "Localizacao": { "Latitude": -23.561, "Longitude": -46.656 },
            "Endereco": { "Cep": "01310-100", "Cidade": "São Paulo" }
        }))
        .unwrap()
    }

    fn store() -> StoreLocation {
        StoreLocation {
            lat: "-23.55".to_owned(),
            lng: "-46.63".to_owned(),
        }
    }

    #[test]
    fn delivery_order_carries_rate_and_store() {
        let delivery = build_delivery_order("77", &store(), &order(), &rate(), &place());
        assert_eq!(delivery.store_id, "77");
        assert_eq!(delivery.rate_id, "A");
        assert_eq!(delivery.duration_minutes, 2 * 24 * 60);
        assert_eq!(delivery.price, Decimal::from(10));
        assert_eq!(delivery.payment_method, 3);
        assert_eq!(delivery.store_location.lat, "-23.55");
    }

    #[test]
    fn delivery_point_uses_order_contact_and_address() {
        let delivery = build_delivery_order("77", &store(), &order(), &rate(), &place());
        let point = &delivery.points[0];
        assert_eq!(point.label, "0");
        assert_eq!(point.assignment, "Deliver goods to customer.");
        assert_eq!(point.contact_name.as_deref(), Some("Ana Souza 11 98888-7777"));
        assert_eq!(point.notify.as_deref(), Some("ana@example.com"));
        assert_eq!(point.address["Numero"], "1578");
        assert_eq!(point.address["Complemento"], serde_json::Value::Null);
        assert_eq!(point.address["Cidade"], "São Paulo");
        assert_eq!(point.location["Latitude"], json!(-23.561));
    }

    #[test]
    fn missing_email_is_not_notified() {
        let mut order = order();
        order.billing_email = String::new();
        let delivery = build_delivery_order("77", &store(), &order, &rate(), &place());
        assert!(delivery.points[0].notify.is_none());
    }
}
