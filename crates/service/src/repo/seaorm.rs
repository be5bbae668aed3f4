use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use models::{employee, establishment, family, order, product};

use crate::errors::ServiceError;
use crate::mapper;
use crate::projection::{EstablishmentRow, OrderProjection, ProductRow};
use crate::repository::{EstablishmentRepository, FamilyRepository, OrderRepository, ProductRepository};

pub struct SeaOrmEstablishmentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl EstablishmentRepository for SeaOrmEstablishmentRepository {
    async fn exists_by_id(&self, tax_id: &str) -> Result<bool, ServiceError> {
        let n = establishment::Entity::find_by_id(tax_id.to_string())
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(n > 0)
    }

    async fn find_by_id(&self, tax_id: &str) -> Result<Option<establishment::Model>, ServiceError> {
        establishment::Entity::find_by_id(tax_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<establishment::Model>, ServiceError> {
        establishment::Entity::find()
            .order_by_asc(establishment::Column::TaxId)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_province_ignore_case(&self, province: &str) -> Result<Vec<establishment::Model>, ServiceError> {
        establishment::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(establishment::Column::Province))).eq(province.to_lowercase()))
            .order_by_asc(establishment::Column::TaxId)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_projection_rows(&self) -> Result<Vec<EstablishmentRow>, ServiceError> {
        establishment::Entity::find()
            .select_only()
            .column(establishment::Column::Name)
            .column(establishment::Column::TaxId)
            .order_by_asc(establishment::Column::TaxId)
            .into_tuple::<EstablishmentRow>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, record: establishment::ActiveModel) -> Result<establishment::Model, ServiceError> {
        // Natural key: decide insert vs. replace by looking the row up.
        let stored = match &record.tax_id {
            ActiveValue::Set(tax_id) | ActiveValue::Unchanged(tax_id) => self.exists_by_id(tax_id).await?,
            ActiveValue::NotSet => false,
        };
        let saved = if stored { record.update(&self.db).await } else { record.insert(&self.db).await };
        saved.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        establishment::Entity::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

pub struct SeaOrmFamilyRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl FamilyRepository for SeaOrmFamilyRepository {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = family::Entity::find_by_id(id).count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(n > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<family::Model>, ServiceError> {
        family::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<family::Model>, ServiceError> {
        family::Entity::find()
            .order_by_asc(family::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, record: family::ActiveModel) -> Result<family::Model, ServiceError> {
        let saved = if record.id.is_not_set() { record.insert(&self.db).await } else { record.update(&self.db).await };
        saved.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        family::Entity::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

/// Row shape of the joined order listing query.
#[derive(Debug, FromQueryResult)]
struct OrderListingRow {
    id: i64,
    placed_at: DateTimeWithTimeZone,
    establishment_name: String,
    first_name: String,
    last_name: String,
    second_last_name: Option<String>,
    status: order::Status,
}

impl From<OrderListingRow> for OrderProjection {
    fn from(row: OrderListingRow) -> Self {
        OrderProjection {
            id: row.id,
            placed_at: row.placed_at.with_timezone(&Utc),
            establishment: row.establishment_name,
            employee: employee::display_name(&row.first_name, &row.last_name, row.second_last_name.as_deref()),
            status: mapper::order_status_from_record(row.status).label().to_string(),
        }
    }
}

pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = order::Entity::find_by_id(id).count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(n > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<order::Model>, ServiceError> {
        order::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<order::Model>, ServiceError> {
        order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_projection(&self) -> Result<Vec<OrderProjection>, ServiceError> {
        let rows = order::Entity::find()
            .select_only()
            .column(order::Column::Id)
            .column(order::Column::PlacedAt)
            .column_as(establishment::Column::Name, "establishment_name")
            .column(employee::Column::FirstName)
            .column(employee::Column::LastName)
            .column(employee::Column::SecondLastName)
            .column(order::Column::Status)
            .join(JoinType::InnerJoin, order::Relation::Establishment.def())
            .join(JoinType::InnerJoin, order::Relation::Employee.def())
            .order_by_asc(order::Column::Id)
            .into_model::<OrderListingRow>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(OrderProjection::from).collect())
    }

    async fn save(&self, record: order::ActiveModel) -> Result<order::Model, ServiceError> {
        let saved = if record.id.is_not_set() { record.insert(&self.db).await } else { record.update(&self.db).await };
        saved.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        order::Entity::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = product::Entity::find_by_id(id).count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(n > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<product::Model>, ServiceError> {
        product::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_projection_rows(&self) -> Result<Vec<ProductRow>, ServiceError> {
        // Column order is the tuple order: name, family name, price.
        product::Entity::find()
            .select_only()
            .column(product::Column::Name)
            .column_as(family::Column::Name, "family_name")
            .column(product::Column::Price)
            .join(JoinType::InnerJoin, product::Relation::Family.def())
            .order_by_asc(product::Column::Id)
            .into_tuple::<ProductRow>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, record: product::ActiveModel) -> Result<product::Model, ServiceError> {
        let saved = if record.id.is_not_set() { record.insert(&self.db).await } else { record.update(&self.db).await };
        saved.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        product::Entity::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone};
    use sea_orm::Set;

    use crate::domain::{Establishment, Family, Order, OrderStatus, Product};
    use crate::services::{EstablishmentService, FamilyService, OrderService, ProductService};
    use crate::test_support::{get_db, unique_suffix};

    fn listing_row(second_last_name: Option<&str>, status: order::Status) -> OrderListingRow {
        OrderListingRow {
            id: 7,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap().into(),
            establishment_name: "ESTABLECIMIENTO X".into(),
            first_name: "PEPÍN".into(),
            last_name: "GALVEZ".into(),
            second_last_name: second_last_name.map(str::to_string),
            status,
        }
    }

    #[test]
    fn listing_row_flattens_into_projection() {
        let p = OrderProjection::from(listing_row(Some("RIDRUEJO"), order::Status::PendingDelivery));
        assert_eq!(p.id, 7);
        assert_eq!(p.placed_at, Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap());
        assert_eq!(p.establishment, "ESTABLECIMIENTO X");
        assert_eq!(p.employee, "GALVEZ RIDRUEJO, PEPÍN");
        assert_eq!(p.status, "Pending delivery");
    }

    #[test]
    fn listing_row_without_second_last_name() {
        let p = OrderProjection::from(listing_row(None, order::Status::Cancelled));
        assert_eq!(p.employee, "GALVEZ, PEPÍN");
        assert_eq!(p.status, "Cancelled");
    }

    #[tokio::test]
    async fn family_insert_then_update() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = FamilyService::new(Arc::new(SeaOrmFamilyRepository { db }));

        let before = svc.get_number_of_families().await?;
        let id = svc.create(&Family::new(format!("Bebidas {}", unique_suffix()))).await?;
        assert_eq!(svc.get_number_of_families().await?, before + 1);

        let renamed = Family { id: Some(id), name: format!("Postres {}", unique_suffix()) };
        svc.update(&renamed).await?;
        assert_eq!(svc.read(id).await?, Some(renamed));
        Ok(())
    }

    #[tokio::test]
    async fn establishment_natural_key_and_province_lookup() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = EstablishmentService::new(Arc::new(SeaOrmEstablishmentRepository { db }));
        let suffix = unique_suffix();
        let province = format!("Provincia {}", suffix);

        let mut e = Establishment::new(format!("T{}", suffix), "Pollos Centro");
        e.address.province = province.to_uppercase();
        let tax_id = svc.create(&e).await?;
        assert!(svc.create(&e).await.unwrap_err().is_invalid_state());

        e.name = "Pollos Norte".into();
        svc.update(&e).await?;
        let found = svc.get_by_province(&province.to_lowercase()).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tax_id.as_deref(), Some(tax_id.as_str()));
        assert_eq!(found[0].name, "Pollos Norte");
        Ok(())
    }

    #[tokio::test]
    async fn product_projection_and_soft_delete() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let families = FamilyService::new(Arc::new(SeaOrmFamilyRepository { db: db.clone() }));
        let products = ProductService::new(Arc::new(SeaOrmProductRepository { db }));
        let suffix = unique_suffix();

        let family_name = format!("Familia {}", suffix);
        let family_id = families.create(&Family::new(family_name.clone())).await?;
        let mut p = Product::new(format!("Producto {}", suffix), 15.0, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        p.family_id = Some(family_id);
        let id = products.create(&p).await?;

        let listing = products.get_products_projection().await?;
        let row = listing.iter().find(|r| r.name == p.name).expect("joined row");
        assert_eq!(row.family, family_name);
        assert_eq!(row.price, 15.0);

        products.delete(id).await?;
        assert!(products.read(id).await?.expect("row is kept").is_delisted());
        Ok(())
    }

    #[tokio::test]
    async fn order_projection_flattens_names_and_status() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let suffix = unique_suffix();
        let establishments = EstablishmentService::new(Arc::new(SeaOrmEstablishmentRepository { db: db.clone() }));
        let tax_id = establishments.create(&Establishment::new(format!("O{}", suffix), "ESTABLECIMIENTO X")).await?;
        let clerk = employee::ActiveModel {
            first_name: Set("PEPÍN".into()),
            last_name: Set("GALVEZ".into()),
            second_last_name: Set(Some("RIDRUEJO".into())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let orders = OrderService::new(Arc::new(SeaOrmOrderRepository { db }));
        let placed_at = Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap();
        let order = Order { status: OrderStatus::InProgress, ..Order::new(placed_at, tax_id, clerk.id) };
        let id = orders.create(&order).await?;

        let listing = orders.get_orders_projection().await?;
        let row = listing.iter().find(|r| r.id == id).expect("joined row");
        assert_eq!(row.placed_at, placed_at);
        assert_eq!(row.establishment, "ESTABLECIMIENTO X");
        assert_eq!(row.employee, "GALVEZ RIDRUEJO, PEPÍN");
        assert_eq!(row.status, "In progress");
        Ok(())
    }
}
