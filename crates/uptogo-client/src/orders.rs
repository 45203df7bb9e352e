//! Delivery order creation and cancellation.

use reqwest::Method;
use serde_json::Value;

use crate::client::{is_empty_result, UptogoClient};
use crate::error::UptogoError;
use crate::types::{DeliveryCreatedResponse, DeliveryOrder, DeliveryOrderPayload};

impl UptogoClient {
    /// Creates a delivery order and returns its identifier.
    ///
    /// Returns `None` when the API reports `sucesso: false`, answers with an
    /// empty body, or omits the identifier.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the body is not JSON.
    pub async fn create_delivery(
        &self,
        order: &DeliveryOrder,
    ) -> Result<Option<String>, UptogoError> {
        let payload = DeliveryOrderPayload { order };
        let body = self
            .request(
                Method::POST,
                &["Pedido.php", "criarEcommerce"],
                &[],
                Some(&payload),
            )
            .await?;
        let created: Option<DeliveryCreatedResponse> =
            Self::decode_non_empty(body, "criarEcommerce")?;
        Ok(created.filter(|c| c.sucesso).and_then(|c| c.id))
    }

    /// Cancels a delivery order. Returns whether the API accepted the
    /// cancellation.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the body is not JSON.
    pub async fn cancel_delivery(&self, delivery_id: &str) -> Result<bool, UptogoError> {
        let body = self
            .request(
                Method::POST,
                &["Pedido.php", "cancelarLote"],
                &[],
                Some(&serde_json::json!({ "id": delivery_id })),
            )
            .await?;
        Ok(cancel_accepted(&body))
    }
}

/// The cancel endpoint answers with a bare boolean; a list is judged by its
/// first element.
fn cancel_accepted(body: &Value) -> bool {
    if is_empty_result(body) {
        return false;
    }
    match body {
        Value::Array(items) => items.first().is_some_and(is_truthy),
        Value::Object(fields) => fields.get("0").is_some_and(is_truthy),
        scalar => is_truthy(scalar),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_true_is_accepted() {
        assert!(cancel_accepted(&json!(true)));
    }

    #[test]
    fn bare_false_is_refused() {
        assert!(!cancel_accepted(&json!(false)));
    }

    #[test]
    fn list_is_judged_by_first_element() {
        assert!(cancel_accepted(&json!([true, false])));
        assert!(!cancel_accepted(&json!([0, 1])));
    }

    #[test]
    fn empty_body_is_refused() {
        assert!(!cancel_accepted(&json!([])));
        assert!(!cancel_accepted(&Value::Null));
    }

    #[test]
    fn object_without_first_index_is_refused() {
        assert!(!cancel_accepted(&json!({ "message": "ok" })));
    }
}
