use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: Option<String>,
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

/// Name as printed on order listings: `"<last> <second last>, <first>"`.
pub fn display_name(first_name: &str, last_name: &str, second_last_name: Option<&str>) -> String {
    match second_last_name.filter(|s| !s.trim().is_empty()) {
        Some(second) => format!("{} {}, {}", last_name, second, first_name),
        None => format!("{}, {}", last_name, first_name),
    }
}
