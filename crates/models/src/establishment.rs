use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Establishment row. Address and contact details are flattened columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "establishment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tax_id: String,
    pub name: String,
    pub opened_on: Option<Date>,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub province: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::has_many(crate::order::Entity).into(),
        }
    }
}

impl Related<crate::order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}
