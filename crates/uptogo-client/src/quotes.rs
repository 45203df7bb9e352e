//! Delivery request ("inventory") and rate endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::client::UptogoClient;
use crate::error::UptogoError;
use crate::types::{
    CreatedResponse, DeliveryRequestPayload, Directions, Merchandise, PlaceDetails, Rate,
    RatesResponse,
};

impl UptogoClient {
    /// Registers a delivery request from the store to `place` and returns its
    /// identifier, or `None` if the API returned nothing.
    ///
    /// The request is always a single-stop store pickup with no loaders and a
    /// zero origin postal code; the API derives the origin from the store.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the response carries no `Id`.
    pub async fn create_delivery_request(
        &self,
        store_id: &str,
        place: &PlaceDetails,
        directions: &Directions,
    ) -> Result<Option<String>, UptogoError> {
        let payload = DeliveryRequestPayload {
            loaders: 0,
            destination_postal_code: &place.address.postal_code,
            origin_postal_code: 0,
            store_id,
            distance: &directions.distance,
            pay_on_delivery: false,
            points: 1,
            pickup: true,
            duration: &directions.duration,
            vehicle_type: 0,
        };
        let body = self
            .request(
                Method::POST,
                &["solicitacaoentregas"],
                &[("return", "true")],
                Some(&payload),
            )
            .await?;
        let created: Option<CreatedResponse> =
            Self::decode_non_empty(body, "solicitacaoentregas")?;
        Ok(created.map(|c| c.id))
    }

    /// Attaches one merchandise line to a delivery request.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the body is not JSON.
    pub async fn create_merchandise(
        &self,
        inventory_id: &str,
        merchandise: &Merchandise,
    ) -> Result<Value, UptogoError> {
        self.request(
            Method::POST,
            &["solicitacaoentregas", inventory_id, "mercadorias"],
            &[("return", "true")],
            Some(merchandise),
        )
        .await
    }

    /// Lists every rate quoted for a delivery request, in API order.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if a rate does not match the expected shape.
    pub async fn rates(&self, inventory_id: &str) -> Result<Vec<Rate>, UptogoError> {
        let body = self
            .request(
                Method::GET,
                &["solicitacaoentregas", inventory_id, "cotacaos"],
                &[],
                None::<&()>,
            )
            .await?;
        Self::decode_rates(body, "cotacaos")
    }

    /// Fetches a single previously quoted rate.
    ///
    /// The endpoint answers with the same `results` envelope as [`Self::rates`];
    /// the first entry is returned.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the rate does not match the expected shape.
    pub async fn rate(
        &self,
        inventory_id: &str,
        rate_id: &str,
    ) -> Result<Option<Rate>, UptogoError> {
        let body = self
            .request(
                Method::GET,
                &["solicitacaoentregas", inventory_id, "cotacaos", rate_id],
                &[],
                None::<&()>,
            )
            .await?;
        Ok(Self::decode_rates(body, "cotacao")?.into_iter().next())
    }

    fn decode_rates(body: Value, context: &str) -> Result<Vec<Rate>, UptogoError> {
        let envelope: Option<RatesResponse> = Self::decode_non_empty(body, context)?;
        Ok(envelope.map(|e| e.results).unwrap_or_default())
    }
}
