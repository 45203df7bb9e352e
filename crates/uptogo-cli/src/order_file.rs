//! JSON order files standing in for the host platform's order storage.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uptogo_core::{find_shipping_method, MemoryOrder, MemoryShippingMethod, Package};

/// An order, its shipping lines and the package to quote.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct OrderFile {
    pub order: MemoryOrder,
    pub shipping_methods: Vec<MemoryShippingMethod>,
    pub package: Package,
}

impl OrderFile {
    pub(crate) async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read order file {}", path.display()))?;
        let file: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid order file {}", path.display()))?;
        tracing::debug!(path = %path.display(), order_id = %file.order.id, "order file loaded");
        Ok(file)
    }

    pub(crate) async fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, raw)
            .await
            .with_context(|| format!("failed to write order file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "order file written");
        Ok(())
    }

    /// Package to quote. An empty destination falls back to the order's
    /// shipping postcode.
    pub(crate) fn package(&self) -> Package {
        let mut package = self.package.clone();
        if package.destination_postcode.trim().is_empty() {
            package
                .destination_postcode
                .clone_from(&self.order.shipping_postcode);
        }
        package
    }

    /// The order's Uptogo shipping line, added if the file has none.
    pub(crate) fn uptogo_line(&mut self) -> &mut MemoryShippingMethod {
        let index = self
            .shipping_methods
            .iter()
            .position(|m| m.method_id == uptogo_core::METHOD_ID);
        let index = index.unwrap_or_else(|| {
            self.shipping_methods.push(MemoryShippingMethod::uptogo());
            self.shipping_methods.len() - 1
        });
        &mut self.shipping_methods[index]
    }

    /// Order and Uptogo shipping line, borrowed together for the delivery
    /// actions.
    pub(crate) fn parts(&mut self) -> (&mut MemoryOrder, Option<&mut MemoryShippingMethod>) {
        (
            &mut self.order,
            find_shipping_method(&mut self.shipping_methods),
        )
    }
}
