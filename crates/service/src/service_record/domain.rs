use models::service_record::ServiceStatus;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordInput {
    pub bike_id: Option<String>,
    pub service_date: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInput {
    pub status: Option<String>,
}

/// Body of the complete call. A missing `completionDate` means "now".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInput {
    pub completion_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewServiceRecord {
    pub bike_id: Uuid,
    pub service_date: DateTimeWithTimeZone,
    pub description: String,
    pub status: ServiceStatus,
    pub completion_date: Option<DateTimeWithTimeZone>,
}
