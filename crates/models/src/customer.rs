use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bike;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Bike,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Bike => Entity::has_many(bike::Entity).into() }
    }
}

impl Related<bike::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bike.def() }
}

impl ActiveModelBehavior for ActiveModel {}
