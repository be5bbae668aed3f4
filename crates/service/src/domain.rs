//! Business model handed to and returned from the services.
//!
//! These types never alias persistence rows: the mapper copies every field
//! in both directions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub province: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Restaurant establishment, identified by its tax id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Establishment {
    pub tax_id: Option<String>,
    pub name: String,
    pub opened_on: Option<NaiveDate>,
    pub address: Address,
    pub contact: ContactDetails,
}

impl Establishment {
    pub fn new(tax_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { tax_id: Some(tax_id.into()), name: name.into(), ..Self::default() }
    }
}

/// Product family (category). `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Family {
    pub id: Option<i64>,
    pub name: String,
}

impl Family {
    pub fn new(name: impl Into<String>) -> Self { Self { id: None, name: name.into() } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    New,
    InProgress,
    PendingDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label used by listings.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "In progress",
            OrderStatus::PendingDelivery => "Pending delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<i64>,
    pub placed_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub establishment_tax_id: String,
    pub employee_id: i64,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(placed_at: DateTime<Utc>, establishment_tax_id: impl Into<String>, employee_id: i64) -> Self {
        Self {
            id: None,
            placed_at,
            notes: None,
            establishment_tax_id: establishment_tax_id.into(),
            employee_id,
            status: OrderStatus::New,
        }
    }
}

/// Lifecycle of a stored product. `Delisted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductState {
    #[default]
    Listed,
    Delisted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub created_on: NaiveDate,
    pub description: Option<String>,
    pub family_id: Option<i64>,
    pub state: ProductState,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, created_on: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            created_on,
            description: None,
            family_id: None,
            state: ProductState::Listed,
        }
    }

    pub fn is_delisted(&self) -> bool { self.state == ProductState::Delisted }

    /// Existing -> Delisted. Delisting twice leaves the product delisted.
    pub fn delist(self) -> Self {
        Self { state: ProductState::Delisted, ..self }
    }
}
