//! Geocoding and routing steps shared by quoting and delivery creation.

use uptogo_client::{Directions, GeoPoint, PlaceDetails, PlaceSuggestion};
use uptogo_core::StoreLocation;

use crate::error::{ShippingError, Stage};
use crate::service::ShippingService;

impl ShippingService {
    /// Candidate places for a postal code.
    ///
    /// # Errors
    ///
    /// [`ShippingError::Aborted`] with [`Stage::PlaceSuggestions`] when the
    /// API has no match; [`ShippingError::Api`] on request failure.
    pub async fn get_place_suggestions(
        &self,
        postcode: &str,
    ) -> Result<Vec<PlaceSuggestion>, ShippingError> {
        let suggestions = self.client.place_suggestions(postcode).await?;
        if suggestions.is_empty() {
            return Err(ShippingError::Aborted(Stage::PlaceSuggestions));
        }
        tracing::debug!(postcode, count = suggestions.len(), "place suggestions resolved");
        Ok(suggestions)
    }

    /// Details of the first suggestion. Later suggestions are never consulted.
    ///
    /// # Errors
    ///
    /// [`ShippingError::Aborted`] with [`Stage::PlaceDetails`] when there is
    /// no suggestion or the lookup is empty; [`ShippingError::Api`] on
    /// request failure.
    pub async fn get_place_details(
        &self,
        suggestions: &[PlaceSuggestion],
    ) -> Result<PlaceDetails, ShippingError> {
        let first = suggestions
            .first()
            .ok_or(ShippingError::Aborted(Stage::PlaceDetails))?;
        self.client
            .place_details(first)
            .await?
            .ok_or(ShippingError::Aborted(Stage::PlaceDetails))
    }

    /// Route from the store to `place`.
    ///
    /// # Errors
    ///
    /// [`ShippingError::Aborted`] with [`Stage::Directions`] when the API
    /// returns nothing; [`ShippingError::Api`] on request failure.
    pub async fn get_directions(
        &self,
        store: &StoreLocation,
        place: &PlaceDetails,
    ) -> Result<Directions, ShippingError> {
        let origin = GeoPoint {
            latitude: store.lat.clone(),
            longitude: store.lng.clone(),
        };
        self.client
            .directions(&origin, &place.location)
            .await?
            .ok_or(ShippingError::Aborted(Stage::Directions))
    }

    /// Suggestions followed by details, freshly resolved on every call.
    pub(crate) async fn resolve_place(&self, postcode: &str) -> Result<PlaceDetails, ShippingError> {
        let suggestions = self.get_place_suggestions(postcode).await?;
        self.get_place_details(&suggestions).await
    }
}
