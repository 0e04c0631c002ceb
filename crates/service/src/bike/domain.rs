use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeInput {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBike {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub customer_id: Uuid,
}
