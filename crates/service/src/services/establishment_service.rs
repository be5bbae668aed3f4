use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::Establishment;
use crate::errors::ServiceError;
use crate::mapper;
use crate::projection::EstablishmentProjection;
use crate::repository::EstablishmentRepository;

/// Application service for establishments, keyed by tax id.
pub struct EstablishmentService<R: EstablishmentRepository> {
    repo: Arc<R>,
}

impl<R: EstablishmentRepository> EstablishmentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn ensure_exists<'a>(&self, tax_id: Option<&'a str>) -> Result<&'a str, ServiceError> {
        if let Some(t) = tax_id {
            if self.repo.exists_by_id(t).await? {
                return Ok(t);
            }
        }
        let shown = tax_id.unwrap_or("null");
        warn!(tax_id = shown, "establishment_not_found");
        Err(ServiceError::invalid_state(format!("establishment with tax id [{}] does not exist", shown)))
    }

    /// Store a new establishment and return its tax id.
    ///
    /// Fails with `InvalidState` when the tax id is missing or already taken.
    ///
    /// # Examples
    /// ```
    /// use service::domain::Establishment;
    /// use service::repository::mock::InMemoryEstablishmentRepository;
    /// use service::services::EstablishmentService;
    /// use std::sync::Arc;
    /// let svc = EstablishmentService::new(Arc::new(InMemoryEstablishmentRepository::default()));
    /// let tax_id = tokio_test::block_on(svc.create(&Establishment::new("B12345678", "Centro"))).unwrap();
    /// assert_eq!(tax_id, "B12345678");
    /// assert!(tokio_test::block_on(svc.create(&Establishment::new("B12345678", "Otro"))).is_err());
    /// ```
    #[instrument(skip(self, establishment))]
    pub async fn create(&self, establishment: &Establishment) -> Result<String, ServiceError> {
        let tax_id = establishment.tax_id.as_deref();
        let rejected = match tax_id {
            Some(t) => self.repo.exists_by_id(t).await?,
            None => true,
        };
        if rejected {
            let shown = tax_id.unwrap_or("null");
            warn!(tax_id = shown, "establishment_create_rejected");
            return Err(ServiceError::invalid_state(format!("tax id [{}] is not valid or already exists", shown)));
        }
        let saved = self.repo.save(mapper::establishment_to_record(establishment)).await?;
        info!(tax_id = %saved.tax_id, "establishment_created");
        Ok(saved.tax_id)
    }

    pub async fn read(&self, tax_id: &str) -> Result<Option<Establishment>, ServiceError> {
        Ok(self.repo.find_by_id(tax_id).await?.map(mapper::establishment_from_record))
    }

    /// Replace a stored establishment entirely.
    #[instrument(skip(self, establishment))]
    pub async fn update(&self, establishment: &Establishment) -> Result<Establishment, ServiceError> {
        self.ensure_exists(establishment.tax_id.as_deref()).await?;
        let saved = self.repo.save(mapper::establishment_to_record(establishment)).await?;
        info!(tax_id = %saved.tax_id, "establishment_updated");
        Ok(mapper::establishment_from_record(saved))
    }

    pub async fn get_all(&self) -> Result<Vec<Establishment>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(mapper::establishment_from_record).collect())
    }

    /// Establishments whose province equals `province`, ignoring case.
    pub async fn get_by_province(&self, province: &str) -> Result<Vec<Establishment>, ServiceError> {
        let rows = self.repo.find_by_province_ignore_case(province).await?;
        Ok(rows.into_iter().map(mapper::establishment_from_record).collect())
    }

    pub async fn get_establishments_projection(&self) -> Result<Vec<EstablishmentProjection>, ServiceError> {
        let rows = self.repo.find_projection_rows().await?;
        Ok(rows.into_iter().map(EstablishmentProjection::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use crate::repository::mock::InMemoryEstablishmentRepository;
    use models::establishment;

    fn row(tax_id: &str, name: &str, province: &str) -> establishment::Model {
        establishment::Model {
            tax_id: tax_id.into(),
            name: name.into(),
            opened_on: None,
            street: "Calle Mayor 1".into(),
            city: "Ciudad".into(),
            postal_code: "00000".into(),
            province: province.into(),
            country: "Spain".into(),
            phone: None,
            email: None,
        }
    }

    fn service(rows: Vec<establishment::Model>) -> (Arc<InMemoryEstablishmentRepository>, EstablishmentService<InMemoryEstablishmentRepository>) {
        let repo = Arc::new(InMemoryEstablishmentRepository::with_rows(rows));
        (repo.clone(), EstablishmentService::new(repo))
    }

    #[tokio::test]
    async fn create_saves_new_establishment() -> Result<(), anyhow::Error> {
        let (repo, svc) = service(vec![]);
        let mut e = Establishment::new("123456789", "Pollos Centro");
        e.address = Address { province: "Madrid".into(), ..Address::default() };

        let tax_id = svc.create(&e).await?;
        assert_eq!(tax_id, "123456789");
        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].province, "Madrid");
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_missing_tax_id() {
        let (repo, svc) = service(vec![]);
        let e = Establishment { tax_id: None, ..Establishment::new("x", "Sin NIF") };

        let err = svc.create(&e).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(ref m) if m == "tax id [null] is not valid or already exists"));
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_tax_id() {
        let (repo, svc) = service(vec![row("123456789", "Existing", "Madrid")]);

        let err = svc.create(&Establishment::new("123456789", "Duplicate")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(ref m) if m == "tax id [123456789] is not valid or already exists"));
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn read_maps_found_and_reports_absent() -> Result<(), anyhow::Error> {
        let (_, svc) = service(vec![row("123456789", "Pollos Centro", "Madrid")]);

        let found = svc.read("123456789").await?.expect("stored establishment");
        assert_eq!(found.tax_id.as_deref(), Some("123456789"));
        assert_eq!(found.address.province, "Madrid");
        assert!(svc.read("999999999").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_existing() -> Result<(), anyhow::Error> {
        let (repo, svc) = service(vec![row("123456789", "Old name", "Madrid")]);
        let mut e = Establishment::new("123456789", "New name");
        e.address.province = "Toledo".into();

        let updated = svc.update(&e).await?;
        assert_eq!(updated, e);
        assert_eq!(repo.saved().len(), 1);
        let stored = svc.read("123456789").await?.unwrap();
        assert_eq!(stored.name, "New name");
        assert_eq!(stored.address.province, "Toledo");
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_unknown_tax_id() {
        let (repo, svc) = service(vec![row("987654321", "Other", "Madrid")]);

        let err = svc.update(&Establishment::new("123456789", "Ghost")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(ref m) if m == "establishment with tax id [123456789] does not exist"));
        assert!(repo.saved().is_empty());

        let err = svc.update(&Establishment::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(ref m) if m.contains("[null]")));
    }

    #[tokio::test]
    async fn get_all_returns_every_row_once() -> Result<(), anyhow::Error> {
        let (_, svc) = service(vec![row("123456789", "A", "Madrid"), row("987654321", "B", "Sevilla")]);

        let all = svc.get_all().await?;
        assert_eq!(all.len(), 2);
        let mut ids: Vec<_> = all.iter().filter_map(|e| e.tax_id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["123456789".to_string(), "987654321".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn get_by_province_ignores_case() -> Result<(), anyhow::Error> {
        let (_, svc) = service(vec![
            row("1", "A", "Madrid"),
            row("2", "B", "MADRID"),
            row("3", "C", "Madrid Sur"),
            row("4", "D", "Sevilla"),
        ]);

        let found = svc.get_by_province("madrid").await?;
        let mut ids: Vec<_> = found.into_iter().filter_map(|e| e.tax_id).collect();
        ids.sort();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
        assert!(svc.get_by_province("Cádiz").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn projection_lists_name_and_tax_id() -> Result<(), anyhow::Error> {
        let (_, svc) = service(vec![row("123456789", "Establecimiento 1", "Madrid"), row("987654321", "Establecimiento 2", "Madrid")]);

        let dtos = svc.get_establishments_projection().await?;
        assert_eq!(dtos.len(), 2);
        assert!(dtos.contains(&EstablishmentProjection { name: "Establecimiento 1".into(), tax_id: "123456789".into() }));
        assert!(dtos.contains(&EstablishmentProjection { name: "Establecimiento 2".into(), tax_id: "987654321".into() }));
        Ok(())
    }

    #[tokio::test]
    async fn repository_failures_propagate() {
        let (repo, svc) = service(vec![]);
        repo.fail_with("connection reset");

        let err = svc.create(&Establishment::new("123456789", "A")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(ref m) if m == "connection reset"));
        assert!(svc.get_all().await.is_err());
    }
}
