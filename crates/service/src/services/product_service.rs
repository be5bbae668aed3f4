use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::show_id;
use crate::domain::Product;
use crate::errors::ServiceError;
use crate::mapper;
use crate::projection::ProductProjection;
use crate::repository::ProductRepository;
use models::product;

fn not_found(id: Option<i64>) -> ServiceError {
    ServiceError::invalid_state(format!("product with id [{}] does not exist", show_id(id)))
}

/// Application service for the product catalog.
///
/// Products are never removed: `delete` delists them and they stay readable.
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn ensure_exists(&self, id: Option<i64>) -> Result<i64, ServiceError> {
        if let Some(id) = id {
            if self.repo.exists_by_id(id).await? {
                return Ok(id);
            }
        }
        warn!(id = ?id, "product_not_found");
        Err(not_found(id))
    }

    async fn load(&self, id: Option<i64>) -> Result<product::Model, ServiceError> {
        let id = self.ensure_exists(id).await?;
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(Some(id)))
    }

    /// Store a new product and return its assigned id.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &Product) -> Result<i64, ServiceError> {
        if product.id.is_some() {
            warn!(id = ?product.id, "product_create_rejected");
            return Err(ServiceError::invalid_state("id must be null to create a product"));
        }
        let saved = self.repo.save(mapper::product_to_record(product)).await?;
        info!(id = saved.id, "product_created");
        Ok(saved.id)
    }

    pub async fn read(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(self.repo.find_by_id(id).await?.map(mapper::product_from_record))
    }

    /// Replace a listed product. Delisted products are immutable.
    #[instrument(skip(self, product), fields(id = ?product.id))]
    pub async fn update(&self, product: &Product) -> Result<Product, ServiceError> {
        let stored = self.load(product.id).await?;
        if stored.delisted {
            warn!(id = stored.id, "product_update_rejected");
            return Err(ServiceError::invalid_state(format!("product with id [{}] is delisted", stored.id)));
        }
        let saved = self.repo.save(mapper::product_to_record(product)).await?;
        info!(id = saved.id, "product_updated");
        Ok(mapper::product_from_record(saved))
    }

    /// Soft delete: load the product, delist it and save it back.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use service::domain::Product;
    /// use service::repository::mock::InMemoryProductRepository;
    /// use service::services::ProductService;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));
    /// let created_on = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let id = tokio_test::block_on(svc.create(&Product::new("Pollo asado", 12.5, created_on))).unwrap();
    /// tokio_test::block_on(svc.delete(id)).unwrap();
    /// let stored = tokio_test::block_on(svc.read(id)).unwrap().unwrap();
    /// assert!(stored.is_delisted());
    /// ```
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let current = self.load(Some(id)).await?;
        let delisted = mapper::product_from_record(current).delist();
        self.repo.save(mapper::product_to_record(&delisted)).await?;
        info!(id, "product_delisted");
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(mapper::product_from_record).collect())
    }

    pub async fn get_number_of_products(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    /// Catalog listing built from raw `(name, family, price)` rows.
    pub async fn get_products_projection(&self) -> Result<Vec<ProductProjection>, ServiceError> {
        let rows = self.repo.find_projection_rows().await?;
        debug!(rows = rows.len(), "products_projection_loaded");
        Ok(rows.into_iter().map(ProductProjection::from).collect())
    }
}
