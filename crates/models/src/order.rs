use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{employee, establishment};

/// Stored order status; the string values are what lands in `orders.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Status {
    #[sea_orm(string_value = "NEW")]
    New,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "PENDING_DELIVERY")]
    PendingDelivery,
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub placed_at: DateTimeWithTimeZone,
    pub notes: Option<String>,
    pub establishment_tax_id: String,
    pub employee_id: i64,
    pub status: Status,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Establishment,
    Employee,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Establishment => Entity::belongs_to(establishment::Entity)
                .from(Column::EstablishmentTaxId)
                .to(establishment::Column::TaxId)
                .into(),
            Relation::Employee => Entity::belongs_to(employee::Entity)
                .from(Column::EmployeeId)
                .to(employee::Column::Id)
                .into(),
        }
    }
}

impl Related<establishment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Establishment.def() }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employee.def() }
}

impl ActiveModelBehavior for ActiveModel {}
