//! Read-only listing views. Never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw catalog row as returned by the store: `(product name, family name, price)`.
pub type ProductRow = (String, String, f64);

/// Raw establishment row: `(name, tax id)`.
pub type EstablishmentRow = (String, String);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProjection {
    pub name: String,
    pub family: String,
    pub price: f64,
}

impl From<ProductRow> for ProductProjection {
    fn from(row: ProductRow) -> Self {
        let (name, family, price) = row;
        Self { name, family, price }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstablishmentProjection {
    pub name: String,
    pub tax_id: String,
}

impl From<EstablishmentRow> for EstablishmentProjection {
    fn from(row: EstablishmentRow) -> Self {
        let (name, tax_id) = row;
        Self { name, tax_id }
    }
}

/// Flattened order listing: ids and labels only, no nested entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderProjection {
    pub id: i64,
    pub placed_at: DateTime<Utc>,
    pub establishment: String,
    /// Employee display name, e.g. `"GALVEZ RIDRUEJO, PEPÍN"`.
    pub employee: String,
    /// Status label, see [`crate::domain::OrderStatus::label`].
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_row_unpacks_positionally() {
        let p = ProductProjection::from(("Producto A".to_string(), "Familia 1".to_string(), 15.0));
        assert_eq!(p.name, "Producto A");
        assert_eq!(p.family, "Familia 1");
        assert_eq!(p.price, 15.0);
    }

    #[test]
    fn projections_serialize_flat() {
        let e = EstablishmentProjection::from(("Centro".to_string(), "B12345678".to_string()));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Centro", "tax_id": "B12345678" }));
    }
}
