//! Repository abstractions the services depend on.
//!
//! Each trait speaks the persistence model (`models::*`). `save` inserts when
//! the key is not set or not stored and replaces the stored row otherwise.

use async_trait::async_trait;

use models::{establishment, family, order, product};

use crate::errors::ServiceError;
use crate::projection::{EstablishmentRow, OrderProjection, ProductRow};

pub mod mock;

#[async_trait]
pub trait EstablishmentRepository: Send + Sync {
    async fn exists_by_id(&self, tax_id: &str) -> Result<bool, ServiceError>;
    async fn find_by_id(&self, tax_id: &str) -> Result<Option<establishment::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<establishment::Model>, ServiceError>;
    /// Exact match on `province`, ignoring case.
    async fn find_by_province_ignore_case(&self, province: &str) -> Result<Vec<establishment::Model>, ServiceError>;
    async fn find_projection_rows(&self) -> Result<Vec<EstablishmentRow>, ServiceError>;
    async fn save(&self, record: establishment::ActiveModel) -> Result<establishment::Model, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait FamilyRepository: Send + Sync {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<family::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<family::Model>, ServiceError>;
    async fn save(&self, record: family::ActiveModel) -> Result<family::Model, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<order::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<order::Model>, ServiceError>;
    /// Joined listing of every order with establishment, employee and status.
    async fn find_projection(&self) -> Result<Vec<OrderProjection>, ServiceError>;
    async fn save(&self, record: order::ActiveModel) -> Result<order::Model, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<product::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError>;
    /// Catalog rows `(product name, family name, price)`.
    async fn find_projection_rows(&self) -> Result<Vec<ProductRow>, ServiceError>;
    async fn save(&self, record: product::ActiveModel) -> Result<product::Model, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}
