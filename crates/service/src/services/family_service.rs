use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::show_id;
use crate::domain::Family;
use crate::errors::ServiceError;
use crate::mapper;
use crate::repository::FamilyRepository;

/// Application service for product families.
pub struct FamilyService<R: FamilyRepository> {
    repo: Arc<R>,
}

impl<R: FamilyRepository> FamilyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn ensure_exists(&self, id: Option<i64>) -> Result<i64, ServiceError> {
        if let Some(id) = id {
            if self.repo.exists_by_id(id).await? {
                return Ok(id);
            }
        }
        warn!(id = ?id, "family_not_found");
        Err(ServiceError::invalid_state(format!("family with id [{}] does not exist", show_id(id))))
    }

    /// Store a new family and return the id assigned by the store.
    ///
    /// # Examples
    /// ```
    /// use service::domain::Family;
    /// use service::repository::mock::InMemoryFamilyRepository;
    /// use service::services::FamilyService;
    /// use std::sync::Arc;
    /// let svc = FamilyService::new(Arc::new(InMemoryFamilyRepository::default()));
    /// let id = tokio_test::block_on(svc.create(&Family::new("Bebidas"))).unwrap();
    /// let stored = tokio_test::block_on(svc.read(id)).unwrap().unwrap();
    /// assert_eq!(stored.name, "Bebidas");
    /// ```
    #[instrument(skip(self, family), fields(name = %family.name))]
    pub async fn create(&self, family: &Family) -> Result<i64, ServiceError> {
        if family.id.is_some() {
            warn!(id = ?family.id, "family_create_rejected");
            return Err(ServiceError::invalid_state("id must be null to create a family"));
        }
        let saved = self.repo.save(mapper::family_to_record(family)).await?;
        info!(id = saved.id, "family_created");
        Ok(saved.id)
    }

    pub async fn read(&self, id: i64) -> Result<Option<Family>, ServiceError> {
        Ok(self.repo.find_by_id(id).await?.map(mapper::family_from_record))
    }

    #[instrument(skip(self, family), fields(id = ?family.id))]
    pub async fn update(&self, family: &Family) -> Result<Family, ServiceError> {
        self.ensure_exists(family.id).await?;
        let saved = self.repo.save(mapper::family_to_record(family)).await?;
        info!(id = saved.id, "family_updated");
        Ok(mapper::family_from_record(saved))
    }

    pub async fn get_all(&self) -> Result<Vec<Family>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(mapper::family_from_record).collect())
    }

    pub async fn get_number_of_families(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }
}
