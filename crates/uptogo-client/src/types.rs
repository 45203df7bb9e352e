//! Uptogo API request and response types.
//!
//! Field names on the wire are Portuguese; every struct renames them to
//! English. Remote identifiers come back as either JSON strings or numbers
//! depending on the endpoint, so they are normalised to `String` on the way
//! in. Place and route values that are only echoed back to the API are kept
//! as raw JSON so nothing is lost in transit.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Accepts a JSON string or number and returns it as a `String`.
pub(crate) fn de_remote_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}

fn de_opt_remote_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// The store account an API key belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    #[serde(rename = "Id", deserialize_with = "de_remote_id")]
    pub id: String,
    /// Store location as `"lat,lng"`.
    #[serde(rename = "Location")]
    pub location: String,
}

// ---------------------------------------------------------------------------
// Places and directions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSuggestion {
    #[serde(deserialize_with = "de_remote_id")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetails {
    /// Geographic point of the place, echoed back verbatim in routing and
    /// delivery payloads.
    #[serde(rename = "Localizacao")]
    pub location: Value,
    #[serde(rename = "Endereco", default)]
    pub address: PlaceAddress,
}

/// Structured address of a place. Only the postal code is read; the other
/// fields are forwarded untouched when a delivery order is created.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceAddress {
    #[serde(rename = "Cep", default)]
    pub postal_code: Value,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PlaceAddress {
    /// Merges the street number and complement into the address object,
    /// overriding any values the place lookup returned for them.
    #[must_use]
    pub fn with_number(&self, number: Option<&str>, complement: Option<&str>) -> Map<String, Value> {
        let mut merged = self.other.clone();
        merged.insert("Cep".to_owned(), self.postal_code.clone());
        merged.insert("Numero".to_owned(), number.map_or(Value::Null, Value::from));
        merged.insert(
            "Complemento".to_owned(),
            complement.map_or(Value::Null, Value::from),
        );
        merged
    }
}

/// Store point in the shape the directions endpoint expects.
#[derive(Debug, Clone, Serialize)]
pub struct GeoPoint {
    #[serde(rename = "Latitude")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    pub longitude: String,
}

/// Store point in the shape the delivery order endpoint expects.
#[derive(Debug, Clone, Serialize)]
pub struct StoreCoordinates {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Directions {
    #[serde(rename = "Distancia")]
    pub distance: Number,
    #[serde(rename = "Tempo")]
    pub duration: Number,
}

#[derive(Serialize)]
pub(crate) struct DirectionsRequest<'a> {
    #[serde(rename = "Pontos")]
    pub points: (&'a GeoPoint, &'a Value),
}

// ---------------------------------------------------------------------------
// Delivery requests, merchandise and rates
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct DeliveryRequestPayload<'a> {
    #[serde(rename = "Carregadores")]
    pub loaders: u32,
    #[serde(rename = "CepDestino")]
    pub destination_postal_code: &'a Value,
    #[serde(rename = "CepOrigem")]
    pub origin_postal_code: u32,
    #[serde(rename = "ClienteId")]
    pub store_id: &'a str,
    #[serde(rename = "Distancia")]
    pub distance: &'a Number,
    #[serde(rename = "PagarNoDestino")]
    pub pay_on_delivery: bool,
    #[serde(rename = "Pontos")]
    pub points: u32,
    #[serde(rename = "Retirar")]
    pub pickup: bool,
    #[serde(rename = "Tempo")]
    pub duration: &'a Number,
    #[serde(rename = "TipoVeiculo")]
    pub vehicle_type: u32,
}

#[derive(Deserialize)]
pub(crate) struct CreatedResponse {
    #[serde(rename = "Id", deserialize_with = "de_remote_id")]
    pub id: String,
}

/// One merchandise line attached to a delivery request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Merchandise {
    #[serde(rename = "Altura")]
    pub height: String,
    #[serde(rename = "Comprimento")]
    pub length: String,
    #[serde(rename = "Largura")]
    pub width: String,
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Peso")]
    pub weight: String,
    #[serde(rename = "Preco")]
    pub price: String,
    #[serde(rename = "Quantidade")]
    pub quantity: u32,
    #[serde(rename = "TipoCaixa")]
    pub box_type: bool,
    #[serde(rename = "TipoEnvelope")]
    pub envelope_type: bool,
}

/// Envelope for the rate listing endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct RatesResponse {
    #[serde(default)]
    pub results: Vec<Rate>,
}

/// A priced quote ("proposal") for a delivery request.
#[derive(Debug, Clone, Deserialize)]
pub struct Rate {
    #[serde(rename = "Id", deserialize_with = "de_remote_id")]
    pub id: String,
    #[serde(rename = "Preco")]
    pub price: Decimal,
    #[serde(rename = "Prazo")]
    pub lead_time_days: u32,
    #[serde(rename = "Modalidade")]
    pub modality: Modality,
}

/// Delivery service tier a rate was quoted for.
#[derive(Debug, Clone, Deserialize)]
pub struct Modality {
    #[serde(rename = "Id", deserialize_with = "de_remote_id")]
    pub id: String,
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Comentario", default)]
    pub comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Delivery orders
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct DeliveryOrderPayload<'a> {
    #[serde(rename = "Pedido")]
    pub order: &'a DeliveryOrder,
}

/// A delivery order for one previously quoted rate.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOrder {
    #[serde(rename = "clienteId")]
    pub store_id: String,
    #[serde(rename = "CotacaoId")]
    pub rate_id: String,
    #[serde(rename = "Distancia")]
    pub distance: u32,
    #[serde(rename = "Ecommerce")]
    pub ecommerce: bool,
    #[serde(rename = "localCliente")]
    pub store_location: StoreCoordinates,
    #[serde(rename = "MetodoPagamento")]
    pub payment_method: u32,
    #[serde(rename = "pontos")]
    pub points: Vec<DeliveryPoint>,
    /// Lead time in minutes.
    #[serde(rename = "Tempo")]
    pub duration_minutes: u32,
    #[serde(rename = "Valor", with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// The drop-off stop of a delivery order.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryPoint {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Invert")]
    pub invert: bool,
    /// Instructions for the courier.
    #[serde(rename = "Tarefa")]
    pub assignment: String,
    #[serde(rename = "NomeContato")]
    pub contact_name: Option<String>,
    /// E-mail address notified about delivery progress.
    #[serde(rename = "Notificar")]
    pub notify: Option<String>,
    #[serde(rename = "Localizacao")]
    pub location: Value,
    #[serde(rename = "Endereco")]
    pub address: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeliveryCreatedResponse {
    #[serde(default)]
    pub sucesso: bool,
    #[serde(default, deserialize_with = "de_opt_remote_id")]
    pub id: Option<String>,
}
