use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{bike, errors::ModelError};

pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Lifecycle of a service record. Stored and serialized as `pending`, `in-progress`, `done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "kebab-case")]
pub enum ServiceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "done")]
    Done,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::InProgress => "in-progress",
            ServiceStatus::Done => "done",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ServiceStatus::Done)
    }
}

/// Exact match only; anything else is rejected rather than mapped to a default.
impl FromStr for ServiceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ServiceStatus::Pending),
            "in-progress" => Ok(ServiceStatus::InProgress),
            "done" => Ok(ServiceStatus::Done),
            other => Err(ModelError::Validation(format!(
                "Invalid service status '{other}'. Must be one of: pending, in-progress, done"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_record")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bike_id: Uuid,
    pub service_date: DateTimeWithTimeZone,
    pub description: String,
    pub status: ServiceStatus,
    pub completion_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Bike }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Bike => Entity::belongs_to(bike::Entity)
                .from(Column::BikeId)
                .to(bike::Column::Id)
                .into(),
        }
    }
}

impl Related<bike::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bike.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Length is counted in characters, not bytes.
pub fn validate_description(description: &str) -> Result<(), ModelError> {
    let len = description.chars().count();
    if !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&len) {
        return Err(ModelError::Validation(format!(
            "Description must be between {DESCRIPTION_MIN_CHARS} and {DESCRIPTION_MAX_CHARS} characters"
        )));
    }
    Ok(())
}
