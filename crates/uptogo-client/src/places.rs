//! Geocoding and routing endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::client::UptogoClient;
use crate::error::UptogoError;
use crate::types::{Directions, DirectionsRequest, GeoPoint, PlaceDetails, PlaceSuggestion};

impl UptogoClient {
    /// Autocompletes a postal code into candidate places, best match first.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the response is not a suggestion list.
    pub async fn place_suggestions(
        &self,
        postcode: &str,
    ) -> Result<Vec<PlaceSuggestion>, UptogoError> {
        let body = self
            .request(
                Method::GET,
                &["placeautocompletes"],
                &[("input", postcode)],
                None::<&()>,
            )
            .await?;
        Ok(Self::decode_non_empty(body, "placeautocompletes")?.unwrap_or_default())
    }

    /// Resolves a suggestion into a located, structured address.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the response is not place details.
    pub async fn place_details(
        &self,
        suggestion: &PlaceSuggestion,
    ) -> Result<Option<PlaceDetails>, UptogoError> {
        let body = self
            .request(
                Method::GET,
                &["placedetails"],
                &[("input", suggestion.id.as_str())],
                None::<&()>,
            )
            .await?;
        Self::decode_non_empty(body, "placedetails")
    }

    /// Computes the route from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if distance or duration is missing.
    pub async fn directions(
        &self,
        origin: &GeoPoint,
        destination: &Value,
    ) -> Result<Option<Directions>, UptogoError> {
        let payload = DirectionsRequest {
            points: (origin, destination),
        };
        let body = self
            .request(Method::POST, &["directions"], &[], Some(&payload))
            .await?;
        Self::decode_non_empty(body, "directions")
    }
}
