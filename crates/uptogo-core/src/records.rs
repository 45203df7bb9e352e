//! Collaborator interfaces implemented by the host platform.
//!
//! The integration never owns orders or shipping-method records; it reads
//! them and writes delivery metadata back through these traits. The
//! `Memory*` types are plain-data implementations used by the CLI host and
//! by tests.

use std::collections::BTreeMap;
use std::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Method id under which the host registers this shipping method.
pub const METHOD_ID: &str = "uptogo";

/// Read access to an order plus the ability to append notes to it.
pub trait OrderRecord {
    /// Stable identifier, used to serialise delivery actions per order.
    fn id(&self) -> &str;
    fn shipping_postcode(&self) -> &str;
    fn shipping_first_name(&self) -> &str;
    fn shipping_last_name(&self) -> &str;
    fn shipping_address_1(&self) -> &str;
    fn shipping_address_2(&self) -> &str;
    fn billing_phone(&self) -> &str;
    fn billing_email(&self) -> &str;
    fn customer_note(&self) -> &str;
    fn add_order_note(&mut self, note: &str);
}

/// Key/value metadata attached to the shipping line of an order.
///
/// Mutations are only durable after [`ShippingMethodRecord::save_meta`].
pub trait ShippingMethodRecord {
    type Error: std::error::Error + Send + Sync + 'static;

    fn method_id(&self) -> &str;
    fn meta(&self, key: &str) -> Option<&str>;
    fn set_meta(&mut self, key: &str, value: &str);
    fn delete_meta(&mut self, key: &str);

    /// Replaces the metadata with what is currently stored.
    ///
    /// Delivery actions call this while holding the order's lock, so a
    /// record loaded before another action finished is brought up to date
    /// before any guard reads it. Records that are their own storage can
    /// return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the host's storage error when the read fails.
    fn reload_meta(&mut self) -> Result<(), Self::Error>;

    /// Persists pending metadata changes.
    ///
    /// # Errors
    ///
    /// Returns the host's storage error when the write fails.
    fn save_meta(&mut self) -> Result<(), Self::Error>;

    fn meta_exists(&self, key: &str) -> bool {
        self.meta(key).is_some()
    }
}

/// Finds the shipping line that belongs to this integration.
pub fn find_shipping_method<M: ShippingMethodRecord>(methods: &mut [M]) -> Option<&mut M> {
    methods.iter_mut().find(|m| m.method_id() == METHOD_ID)
}

/// A shipment being quoted: where it goes and what is in it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Package {
    pub destination_postcode: String,
    #[serde(default)]
    pub contents: Vec<PackageItem>,
}

/// One content line of a package, with the product attributes as the host
/// stores them (free text, possibly blank).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub created_at: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryOrder {
    pub id: String,
    pub shipping_postcode: String,
    pub shipping_first_name: String,
    pub shipping_last_name: String,
    pub shipping_address_1: String,
    pub shipping_address_2: String,
    pub billing_phone: String,
    pub billing_email: String,
    pub customer_note: String,
    pub notes: Vec<OrderNote>,
}

impl OrderRecord for MemoryOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn shipping_postcode(&self) -> &str {
        &self.shipping_postcode
    }

    fn shipping_first_name(&self) -> &str {
        &self.shipping_first_name
    }

    fn shipping_last_name(&self) -> &str {
        &self.shipping_last_name
    }

    fn shipping_address_1(&self) -> &str {
        &self.shipping_address_1
    }

    fn shipping_address_2(&self) -> &str {
        &self.shipping_address_2
    }

    fn billing_phone(&self) -> &str {
        &self.billing_phone
    }

    fn billing_email(&self) -> &str {
        &self.billing_email
    }

    fn customer_note(&self) -> &str {
        &self.customer_note
    }

    fn add_order_note(&mut self, note: &str) {
        self.notes.push(OrderNote {
            created_at: Utc::now(),
            text: note.to_owned(),
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryShippingMethod {
    pub method_id: String,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Metadata changed since the last `save_meta`.
    #[serde(skip)]
    pub dirty: bool,
}

impl MemoryShippingMethod {
    #[must_use]
    pub fn uptogo() -> Self {
        Self {
            method_id: METHOD_ID.to_owned(),
            ..Self::default()
        }
    }
}

impl ShippingMethodRecord for MemoryShippingMethod {
    type Error = Infallible;

    fn method_id(&self) -> &str {
        &self.method_id
    }

    fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    fn set_meta(&mut self, key: &str, value: &str) {
        self.meta.insert(key.to_owned(), value.to_owned());
        self.dirty = true;
    }

    fn delete_meta(&mut self, key: &str) {
        if self.meta.remove(key).is_some() {
            self.dirty = true;
        }
    }

    /// The in-memory map is the stored state.
    fn reload_meta(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn save_meta(&mut self) -> Result<(), Self::Error> {
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_shipping_method_matches_uptogo_only() {
        let mut methods = vec![
            MemoryShippingMethod {
                method_id: "flat_rate".to_owned(),
                ..MemoryShippingMethod::default()
            },
            MemoryShippingMethod::uptogo(),
        ];
        let found = find_shipping_method(&mut methods).expect("uptogo method present");
        assert_eq!(found.method_id, METHOD_ID);
    }

    #[test]
    fn find_shipping_method_none_when_absent() {
        let mut methods = vec![MemoryShippingMethod {
            method_id: "local_pickup".to_owned(),
            ..MemoryShippingMethod::default()
        }];
        assert!(find_shipping_method(&mut methods).is_none());
    }

    #[test]
    fn set_meta_marks_dirty_until_saved() {
        let mut method = MemoryShippingMethod::uptogo();
        method.set_meta("Request", "9");
        assert!(method.dirty);
        assert!(method.meta_exists("Request"));
        method.save_meta().unwrap();
        assert!(!method.dirty);
    }

    #[test]
    fn deleting_missing_key_is_not_a_change() {
        let mut method = MemoryShippingMethod::uptogo();
        method.delete_meta("Request");
        assert!(!method.dirty);
    }

    #[test]
    fn order_notes_are_appended_in_order() {
        let mut order = MemoryOrder::default();
        order.add_order_note("first");
        order.add_order_note("second");
        let texts: Vec<_> = order.notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn package_item_fields_default_when_missing() {
        let item: PackageItem = serde_json::from_str(r#"{"name": "Mug"}"#).unwrap();
        assert_eq!(item.name, "Mug");
        assert!(item.height.is_empty());
        assert!(item.quantity.is_none());
    }
}
