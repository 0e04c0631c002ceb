use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CustomerInputDoc { pub name: Option<String>, pub email: Option<String>, pub phone: Option<String> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BikeInputDoc {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub customer_id: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceRecordInputDoc {
    pub bike_id: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub service_date: String,
    pub description: String,
    /// `pending`, `in-progress` or `done`
    pub status: String,
}

#[derive(ToSchema)]
pub struct StatusInputDoc { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CompleteInputDoc { pub completion_date: Option<String> }

#[derive(OpenApi)]
#[openapi(
    info(title = "Bike Service Management API"),
    paths(
        crate::routes::health,
        crate::routes::customers::create,
        crate::routes::customers::list,
        crate::routes::customers::get,
        crate::routes::customers::update,
        crate::routes::customers::delete,
        crate::routes::bikes::create,
        crate::routes::bikes::list,
        crate::routes::bikes::get,
        crate::routes::bikes::delete,
        crate::routes::services::create,
        crate::routes::services::list,
        crate::routes::services::pending_or_overdue,
        crate::routes::services::get,
        crate::routes::services::update_status,
        crate::routes::services::complete,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerInputDoc,
            BikeInputDoc,
            ServiceRecordInputDoc,
            StatusInputDoc,
            CompleteInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "bikes"),
        (name = "services")
    )
)]
pub struct ApiDoc;
