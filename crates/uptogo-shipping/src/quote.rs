//! The quoting pipeline run for every shipping-cost calculation.

use rust_decimal::Decimal;
use serde::Serialize;
use uptogo_client::Rate;
use uptogo_core::meta::{INVENTORY_KEY, PROPOSAL_KEY, WARNING_KEY};
use uptogo_core::records::{PackageItem, ShippingMethodRecord};
use uptogo_core::Package;

use crate::error::{ShippingError, Stage};
use crate::format::{format_merchandise, format_rate_label};
use crate::service::ShippingService;

pub const CALC_TAX_PER_ORDER: &str = "per_order";

/// A rate offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingRate {
    /// Modality id, so the same service tier keeps the same id across quotes.
    pub id: String,
    pub label: String,
    pub cost: Decimal,
    pub calc_tax: &'static str,
    pub meta: RateMeta,
}

/// Identifies the quote behind an offer. Stored on the shipping line when the
/// customer picks the offer, and read back when the delivery is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateMeta {
    pub inventory_id: String,
    pub proposal_id: String,
    pub warning: Option<String>,
}

impl ShippingRate {
    #[must_use]
    pub fn from_rate(inventory_id: &str, rate: &Rate) -> Self {
        Self {
            id: rate.modality.id.clone(),
            label: format_rate_label(rate),
            cost: rate.price,
            calc_tax: CALC_TAX_PER_ORDER,
            meta: RateMeta {
                inventory_id: inventory_id.to_owned(),
                proposal_id: rate.id.clone(),
                warning: rate.modality.comment.clone(),
            },
        }
    }

    /// Records this offer as the customer's choice on a shipping line.
    ///
    /// Does not persist; call `save_meta` afterwards.
    pub fn select<M: ShippingMethodRecord + ?Sized>(&self, record: &mut M) {
        record.set_meta(INVENTORY_KEY, &self.meta.inventory_id);
        record.set_meta(PROPOSAL_KEY, &self.meta.proposal_id);
        match &self.meta.warning {
            Some(warning) => record.set_meta(WARNING_KEY, warning),
            None => record.delete_meta(WARNING_KEY),
        }
    }
}

/// Receives offers one at a time, in the order the API quoted them.
pub trait RateSink {
    fn add_rate(&mut self, rate: ShippingRate);
}

impl RateSink for Vec<ShippingRate> {
    fn add_rate(&mut self, rate: ShippingRate) {
        self.push(rate);
    }
}

impl ShippingService {
    /// Quotes `package` and hands every offer to `sink`.
    ///
    /// Any failure along the way leaves `sink` untouched; the cause is only
    /// logged. Returns the number of offers emitted.
    pub async fn calculate_shipping<S: RateSink + ?Sized>(
        &self,
        package: &Package,
        sink: &mut S,
    ) -> usize {
        match self.quote(package).await {
            Ok(rates) => {
                let count = rates.len();
                for rate in rates {
                    sink.add_rate(rate);
                }
                count
            }
            Err(ShippingError::InvalidSettings) => {
                tracing::debug!("settings incomplete, no rates offered");
                0
            }
            Err(e) => {
                tracing::warn!(
                    postcode = %package.destination_postcode,
                    error = %e,
                    "shipping quote aborted"
                );
                0
            }
        }
    }

    /// Runs the quoting pipeline and returns the offers without emitting them.
    ///
    /// 1. Resolve the destination postcode to a place.
    /// 2. Route from the store to that place.
    /// 3. Register a new delivery request.
    /// 4. Attach one merchandise line per package content.
    /// 5. List the quoted rates and convert them to offers.
    ///
    /// # Errors
    ///
    /// - [`ShippingError::InvalidSettings`] if settings are incomplete.
    /// - [`ShippingError::InvalidStoreLocation`] if the store location has no
    ///   longitude.
    /// - [`ShippingError::Aborted`] naming the first stage that came back empty.
    /// - [`ShippingError::Api`] on request failure.
    pub async fn quote(&self, package: &Package) -> Result<Vec<ShippingRate>, ShippingError> {
        if !self.settings.is_valid() {
            return Err(ShippingError::InvalidSettings);
        }
        let store = self.store_location()?;

        let place = self.resolve_place(&package.destination_postcode).await?;
        let directions = self.get_directions(&store, &place).await?;

        let inventory_id = self
            .client
            .create_delivery_request(&self.settings.store_id, &place, &directions)
            .await?
            .ok_or(ShippingError::Aborted(Stage::DeliveryRequest))?;
        tracing::debug!(inventory_id = %inventory_id, "delivery request created");

        self.create_merchandises(&inventory_id, &package.contents)
            .await;

        let rates = self.client.rates(&inventory_id).await?;
        if rates.is_empty() {
            return Err(ShippingError::Aborted(Stage::Rates));
        }

        Ok(rates
            .iter()
            .map(|rate| ShippingRate::from_rate(&inventory_id, rate))
            .collect())
    }

    /// Attaches every package line to the delivery request. A failed line is
    /// logged and skipped; rates are still fetched for whatever was accepted.
    async fn create_merchandises(&self, inventory_id: &str, contents: &[PackageItem]) {
        for item in contents {
            let merchandise = format_merchandise(item);
            if let Err(e) = self
                .client
                .create_merchandise(inventory_id, &merchandise)
                .await
            {
                tracing::warn!(
                    inventory_id,
                    item = %merchandise.name,
                    error = %e,
                    "merchandise line not registered"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uptogo_core::MemoryShippingMethod;

    fn rate() -> Rate {
        serde_json::from_value(serde_json::json!({
            "Id": 44,
            "Preco": "18.90",
            "Prazo": 1,
            "Modalidade": { "Id": 3, "Nome": "Moto", "Comentario": "Até 10kg" }
        }))
        .unwrap()
    }

    #[test]
    fn from_rate_maps_ids_and_cost() {
        let offer = ShippingRate::from_rate("inv-9", &rate());
        assert_eq!(offer.id, "3");
        assert_eq!(offer.cost, Decimal::new(1890, 2));
        assert_eq!(offer.calc_tax, "per_order");
        assert_eq!(offer.label, "Uptogo - Moto (1 day)");
        assert_eq!(offer.meta.inventory_id, "inv-9");
        assert_eq!(offer.meta.proposal_id, "44");
        assert_eq!(offer.meta.warning.as_deref(), Some("Até 10kg"));
    }

    #[test]
    fn select_writes_labelled_metadata() {
        let mut method = MemoryShippingMethod::uptogo();
        ShippingRate::from_rate("inv-9", &rate()).select(&mut method);
        assert_eq!(method.meta("Inventory"), Some("inv-9"));
        assert_eq!(method.meta("Proposal"), Some("44"));
        assert_eq!(method.meta("Warning"), Some("Até 10kg"));
        assert!(method.dirty);
    }

    #[test]
    fn vec_sink_keeps_order() {
        let mut sink: Vec<ShippingRate> = Vec::new();
        let first = ShippingRate::from_rate("a", &rate());
        let second = ShippingRate::from_rate("b", &rate());
        sink.add_rate(first.clone());
        sink.add_rate(second.clone());
        assert_eq!(sink, vec![first, second]);
    }
}
