//! Simple in-memory repositories for tests and doc examples.
//!
//! Every successful `save` is appended to a log (`saved()`), so callers can
//! assert both what was written and that nothing was.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sea_orm::{Set, TryIntoModel};

use models::{establishment, family, order, product};

use super::{EstablishmentRepository, FamilyRepository, OrderRepository, ProductRepository};
use crate::errors::ServiceError;
use crate::projection::{EstablishmentRow, OrderProjection, ProductRow};

struct Table<K, M> {
    rows: Mutex<BTreeMap<K, M>>,
    saved: Mutex<Vec<M>>,
    next_id: AtomicI64,
    failure: Mutex<Option<String>>,
}

impl<K, M> Default for Table<K, M> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            saved: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            failure: Mutex::new(None),
        }
    }
}

impl<K: Ord, M: Clone> Table<K, M> {
    /// Fails every call once `fail_with` was used, mimicking a broken store.
    fn check(&self) -> Result<(), ServiceError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(msg) => Err(ServiceError::Db(msg.clone())),
            None => Ok(()),
        }
    }

    fn fail_with(&self, msg: String) { *self.failure.lock().unwrap() = Some(msg); }

    fn contains(&self, key: &K) -> bool { self.rows.lock().unwrap().contains_key(key) }

    fn get(&self, key: &K) -> Option<M> { self.rows.lock().unwrap().get(key).cloned() }

    fn all(&self) -> Vec<M> { self.rows.lock().unwrap().values().cloned().collect() }

    fn len(&self) -> u64 { self.rows.lock().unwrap().len() as u64 }

    fn seed(&self, key: K, row: M) { self.rows.lock().unwrap().insert(key, row); }

    fn store(&self, key: K, row: M) {
        self.saved.lock().unwrap().push(row.clone());
        self.rows.lock().unwrap().insert(key, row);
    }

    fn saved(&self) -> Vec<M> { self.saved.lock().unwrap().clone() }

    fn bump_past(&self, id: i64) { self.next_id.fetch_max(id + 1, Ordering::SeqCst); }

    fn next_id(&self) -> i64 { self.next_id.fetch_add(1, Ordering::SeqCst) }
}

#[derive(Default)]
pub struct InMemoryEstablishmentRepository {
    table: Table<String, establishment::Model>,
}

impl InMemoryEstablishmentRepository {
    pub fn with_rows(rows: impl IntoIterator<Item = establishment::Model>) -> Self {
        let repo = Self::default();
        for row in rows {
            repo.table.seed(row.tax_id.clone(), row);
        }
        repo
    }

    pub fn saved(&self) -> Vec<establishment::Model> { self.table.saved() }

    pub fn fail_with(&self, msg: impl Into<String>) { self.table.fail_with(msg.into()) }
}

#[async_trait]
impl EstablishmentRepository for InMemoryEstablishmentRepository {
    async fn exists_by_id(&self, tax_id: &str) -> Result<bool, ServiceError> {
        self.table.check()?;
        Ok(self.table.contains(&tax_id.to_string()))
    }

    async fn find_by_id(&self, tax_id: &str) -> Result<Option<establishment::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.get(&tax_id.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<establishment::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.all())
    }

    async fn find_by_province_ignore_case(&self, province: &str) -> Result<Vec<establishment::Model>, ServiceError> {
        self.table.check()?;
        let wanted = province.to_lowercase();
        Ok(self.table.all().into_iter().filter(|e| e.province.to_lowercase() == wanted).collect())
    }

    async fn find_projection_rows(&self) -> Result<Vec<EstablishmentRow>, ServiceError> {
        self.table.check()?;
        Ok(self.table.all().into_iter().map(|e| (e.name, e.tax_id)).collect())
    }

    async fn save(&self, record: establishment::ActiveModel) -> Result<establishment::Model, ServiceError> {
        self.table.check()?;
        let model = record.try_into_model()?;
        self.table.store(model.tax_id.clone(), model.clone());
        Ok(model)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.table.check()?;
        Ok(self.table.len())
    }
}

#[derive(Default)]
pub struct InMemoryFamilyRepository {
    table: Table<i64, family::Model>,
}

impl InMemoryFamilyRepository {
    pub fn with_rows(rows: impl IntoIterator<Item = family::Model>) -> Self {
        let repo = Self::default();
        for row in rows {
            repo.table.bump_past(row.id);
            repo.table.seed(row.id, row);
        }
        repo
    }

    pub fn saved(&self) -> Vec<family::Model> { self.table.saved() }

    pub fn fail_with(&self, msg: impl Into<String>) { self.table.fail_with(msg.into()) }
}

#[async_trait]
impl FamilyRepository for InMemoryFamilyRepository {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        self.table.check()?;
        Ok(self.table.contains(&id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<family::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.get(&id))
    }

    async fn find_all(&self) -> Result<Vec<family::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.all())
    }

    async fn save(&self, mut record: family::ActiveModel) -> Result<family::Model, ServiceError> {
        self.table.check()?;
        if record.id.is_not_set() {
            record.id = Set(self.table.next_id());
        }
        let model = record.try_into_model()?;
        self.table.store(model.id, model.clone());
        Ok(model)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.table.check()?;
        Ok(self.table.len())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    table: Table<i64, order::Model>,
    projection: Mutex<Vec<OrderProjection>>,
}

impl InMemoryOrderRepository {
    pub fn with_rows(rows: impl IntoIterator<Item = order::Model>) -> Self {
        let repo = Self::default();
        for row in rows {
            repo.table.bump_past(row.id);
            repo.table.seed(row.id, row);
        }
        repo
    }

    /// Rows returned verbatim by `find_projection`.
    pub fn with_projection(self, rows: Vec<OrderProjection>) -> Self {
        *self.projection.lock().unwrap() = rows;
        self
    }

    pub fn saved(&self) -> Vec<order::Model> { self.table.saved() }

    pub fn fail_with(&self, msg: impl Into<String>) { self.table.fail_with(msg.into()) }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        self.table.check()?;
        Ok(self.table.contains(&id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<order::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.get(&id))
    }

    async fn find_all(&self) -> Result<Vec<order::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.all())
    }

    async fn find_projection(&self) -> Result<Vec<OrderProjection>, ServiceError> {
        self.table.check()?;
        Ok(self.projection.lock().unwrap().clone())
    }

    async fn save(&self, mut record: order::ActiveModel) -> Result<order::Model, ServiceError> {
        self.table.check()?;
        if record.id.is_not_set() {
            record.id = Set(self.table.next_id());
        }
        let model = record.try_into_model()?;
        self.table.store(model.id, model.clone());
        Ok(model)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.table.check()?;
        Ok(self.table.len())
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Table<i64, product::Model>,
    projection: Mutex<Vec<ProductRow>>,
}

impl InMemoryProductRepository {
    pub fn with_rows(rows: impl IntoIterator<Item = product::Model>) -> Self {
        let repo = Self::default();
        for row in rows {
            repo.table.bump_past(row.id);
            repo.table.seed(row.id, row);
        }
        repo
    }

    /// Rows returned verbatim by `find_projection_rows`.
    pub fn with_projection_rows(self, rows: Vec<ProductRow>) -> Self {
        *self.projection.lock().unwrap() = rows;
        self
    }

    pub fn saved(&self) -> Vec<product::Model> { self.table.saved() }

    pub fn fail_with(&self, msg: impl Into<String>) { self.table.fail_with(msg.into()) }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        self.table.check()?;
        Ok(self.table.contains(&id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<product::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.get(&id))
    }

    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        self.table.check()?;
        Ok(self.table.all())
    }

    async fn find_projection_rows(&self) -> Result<Vec<ProductRow>, ServiceError> {
        self.table.check()?;
        Ok(self.projection.lock().unwrap().clone())
    }

    async fn save(&self, mut record: product::ActiveModel) -> Result<product::Model, ServiceError> {
        self.table.check()?;
        if record.id.is_not_set() {
            record.id = Set(self.table.next_id());
        }
        let model = record.try_into_model()?;
        self.table.store(model.id, model.clone());
        Ok(model)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.table.check()?;
        Ok(self.table.len())
    }
}
