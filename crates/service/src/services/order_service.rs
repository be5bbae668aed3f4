use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::show_id;
use crate::domain::Order;
use crate::errors::ServiceError;
use crate::mapper;
use crate::projection::OrderProjection;
use crate::repository::OrderRepository;

/// Application service for orders.
pub struct OrderService<R: OrderRepository> {
    repo: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn ensure_exists(&self, id: Option<i64>) -> Result<i64, ServiceError> {
        if let Some(id) = id {
            if self.repo.exists_by_id(id).await? {
                return Ok(id);
            }
        }
        warn!(id = ?id, "order_not_found");
        Err(ServiceError::invalid_state(format!("order with id [{}] does not exist", show_id(id))))
    }

    /// Store a new order and return its assigned id.
    #[instrument(skip(self, order), fields(establishment = %order.establishment_tax_id))]
    pub async fn create(&self, order: &Order) -> Result<i64, ServiceError> {
        if order.id.is_some() {
            warn!(id = ?order.id, "order_create_rejected");
            return Err(ServiceError::invalid_state("id must be null to create an order"));
        }
        let saved = self.repo.save(mapper::order_to_record(order)).await?;
        info!(id = saved.id, "order_created");
        Ok(saved.id)
    }

    pub async fn read(&self, id: i64) -> Result<Option<Order>, ServiceError> {
        Ok(self.repo.find_by_id(id).await?.map(mapper::order_from_record))
    }

    #[instrument(skip(self, order), fields(id = ?order.id))]
    pub async fn update(&self, order: &Order) -> Result<Order, ServiceError> {
        self.ensure_exists(order.id).await?;
        let saved = self.repo.save(mapper::order_to_record(order)).await?;
        info!(id = saved.id, status = ?saved.status, "order_updated");
        Ok(mapper::order_from_record(saved))
    }

    pub async fn get_all(&self) -> Result<Vec<Order>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(mapper::order_from_record).collect())
    }

    /// Flattened listing straight from the store; no entity mapping involved.
    pub async fn get_orders_projection(&self) -> Result<Vec<OrderProjection>, ServiceError> {
        let rows = self.repo.find_projection().await?;
        debug!(rows = rows.len(), "orders_projection_loaded");
        Ok(rows)
    }
}
