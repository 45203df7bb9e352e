//! Pure data-shaping helpers for labels, notes and API payloads.

use std::sync::LazyLock;

use regex::Regex;
use uptogo_client::{Merchandise, Rate};
use uptogo_core::records::{OrderRecord, PackageItem};
use uptogo_core::sanitize::{non_blank, sanitize_value};

const DEFAULT_ASSIGNMENT: &str = "Deliver goods to customer.";
const DEFAULT_MERCHANDISE_NAME: &str = "Sem nome";
const DEFAULT_MEASURE: &str = "1";

/// Leading digits plus an optional letter, e.g. `123` or `123B`. ASCII only.
static ADDRESS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[0-9A-Za-z_]?").expect("valid address number regex"));

/// `"Immediate delivery"` for same-day rates, otherwise a day count.
#[must_use]
pub fn format_delivery_time(days: u32) -> String {
    match days {
        0 => "Immediate delivery".to_owned(),
        1 => "1 day".to_owned(),
        n => format!("{n} days"),
    }
}

/// Checkout label for a rate, e.g. `"Uptogo - Moto (2 days)"`.
#[must_use]
pub fn format_rate_label(rate: &Rate) -> String {
    format!(
        "Uptogo - {} ({})",
        rate.modality.name,
        format_delivery_time(rate.lead_time_days)
    )
}

/// Recipient name and phone for the courier, or `None` if the order has
/// neither.
pub fn format_contact_name<O: OrderRecord + ?Sized>(order: &O) -> Option<String> {
    let contact = format!(
        "{} {} {}",
        order.shipping_first_name(),
        order.shipping_last_name(),
        order.billing_phone()
    );
    non_blank(&contact).map(str::to_owned)
}

/// Courier instructions: the customer's note, or a generic instruction.
pub fn format_assignment<O: OrderRecord + ?Sized>(order: &O) -> String {
    sanitize_value(order.customer_note(), DEFAULT_ASSIGNMENT).to_owned()
}

/// Merchandise payload for one package line. Blank attributes are replaced,
/// never rejected.
#[must_use]
pub fn format_merchandise(item: &PackageItem) -> Merchandise {
    let measure = |value: &str| sanitize_value(value, DEFAULT_MEASURE).to_owned();
    Merchandise {
        height: measure(&item.height),
        length: measure(&item.length),
        width: measure(&item.width),
        name: sanitize_value(&item.name, DEFAULT_MERCHANDISE_NAME).to_owned(),
        weight: measure(&item.weight),
        price: measure(&item.price),
        quantity: item.quantity.unwrap_or(1),
        box_type: true,
        envelope_type: false,
    }
}

/// First house number found in an address line.
#[must_use]
pub fn extract_number_from_address(address: &str) -> Option<&str> {
    ADDRESS_NUMBER.find(address).map(|m| m.as_str())
}

/// HTML link to the delivery's tracking page, used in order notes.
#[must_use]
pub fn format_delivery_link(app_base_url: &str, delivery_id: &str) -> String {
    format!(
        "<a href=\"{}/acompanhar/lote/{delivery_id}\">{delivery_id}</a>",
        app_base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uptogo_core::MemoryOrder;

    fn rate(name: &str, days: u32) -> Rate {
        serde_json::from_value(serde_json::json!({
            "Id": "p1",
            "Preco": 10,
            "Prazo": days,
            "Modalidade": { "Id": 1, "Nome": name }
        }))
        .unwrap()
    }

    #[test]
    fn delivery_time_pluralises_days() {
        assert_eq!(format_delivery_time(0), "Immediate delivery");
        assert_eq!(format_delivery_time(1), "1 day");
        assert_eq!(format_delivery_time(2), "2 days");
    }

    #[test]
    fn rate_label_includes_modality_and_time() {
        assert_eq!(format_rate_label(&rate("Moto", 2)), "Uptogo - Moto (2 days)");
        assert_eq!(
            format_rate_label(&rate("Carro", 0)),
            "Uptogo - Carro (Immediate delivery)"
        );
    }

    #[test]
    fn address_number_with_letter() {
        assert_eq!(extract_number_from_address("Rua A, 123B"), Some("123B"));
    }

    #[test]
    fn address_without_number() {
        assert_eq!(extract_number_from_address("Rua A"), None);
    }

    #[test]
    fn address_number_takes_first_match() {
        assert_eq!(
            extract_number_from_address("Rua 25 de Março, 1000"),
            Some("25")
        );
    }

    #[test]
    fn address_number_takes_at_most_one_letter() {
        assert_eq!(extract_number_from_address("Av. B, 42ab"), Some("42a"));
    }

    #[test]
    fn contact_name_joins_name_and_phone() {
        let order = MemoryOrder {
            shipping_first_name: "Ana".to_owned(),
            shipping_last_name: "Souza".to_owned(),
            billing_phone: "11 98888-7777".to_owned(),
            ..MemoryOrder::default()
        };
        assert_eq!(
            format_contact_name(&order).as_deref(),
            Some("Ana Souza 11 98888-7777")
        );
    }

    #[test]
    fn contact_name_absent_when_all_blank() {
        assert_eq!(format_contact_name(&MemoryOrder::default()), None);
    }

    #[test]
    fn assignment_defaults_when_note_blank() {
        let mut order = MemoryOrder {
            customer_note: "  ".to_owned(),
            ..MemoryOrder::default()
        };
        assert_eq!(format_assignment(&order), "Deliver goods to customer.");
        order.customer_note = "Ring twice".to_owned();
        assert_eq!(format_assignment(&order), "Ring twice");
    }

    #[test]
    fn merchandise_substitutes_blank_fields() {
        let item = PackageItem {
            name: " ".to_owned(),
            height: "12".to_owned(),
            ..PackageItem::default()
        };
        let merchandise = format_merchandise(&item);
        assert_eq!(merchandise.name, "Sem nome");
        assert_eq!(merchandise.height, "12");
        assert_eq!(merchandise.length, "1");
        assert_eq!(merchandise.width, "1");
        assert_eq!(merchandise.weight, "1");
        assert_eq!(merchandise.price, "1");
        assert_eq!(merchandise.quantity, 1);
        assert!(merchandise.box_type);
        assert!(!merchandise.envelope_type);
    }

    #[test]
    fn delivery_link_points_at_tracking_page() {
        assert_eq!(
            format_delivery_link("https://web.uptogo.com.br/", "9001"),
            "<a href=\"https://web.uptogo.com.br/acompanhar/lote/9001\">9001</a>"
        );
    }
}
