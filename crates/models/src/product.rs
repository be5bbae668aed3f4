use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::family;

/// Product row. Rows are never deleted; `delisted` marks them withdrawn.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_on: Date,
    pub description: Option<String>,
    pub family_id: Option<i64>,
    pub delisted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Family,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Family => Entity::belongs_to(family::Entity)
                .from(Column::FamilyId)
                .to(family::Column::Id)
                .into(),
        }
    }
}

impl Related<family::Entity> for Entity {
    fn to() -> RelationDef { Relation::Family.def() }
}

impl ActiveModelBehavior for ActiveModel {}
