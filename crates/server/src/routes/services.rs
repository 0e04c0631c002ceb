use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::ApiResponse;
use models::service_record;
use service::service_record::domain::{CompleteInput, ServiceRecordInput, StatusInput};
use service::validate::parse_id;

use crate::errors::ApiError;
use crate::state::ServerState;

type Reply<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::ServiceRecordInputDoc,
    responses(
        (status = 201, description = "Service record created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Bike not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<ServiceRecordInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<service_record::Model>>), ApiError> {
    let Json(input) = body?;
    let created = state.services.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Service record created successfully", created))))
}

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "Newest service date first")))]
pub async fn list(State(state): State<ServerState>) -> Reply<Vec<service_record::Model>> {
    let records = state.services.list().await?;
    Ok(Json(ApiResponse::ok("Service records fetched successfully", records)))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service record ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Service not found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Reply<service_record::Model> {
    let found = state.services.get(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Service record fetched successfully", found)))
}

#[utoipa::path(
    put, path = "/api/services/{id}/status", tag = "services",
    params(("id" = String, Path, description = "Service record ID")),
    request_body = crate::openapi::StatusInputDoc,
    responses((status = 200, description = "Status updated"), (status = 400, description = "Invalid status"), (status = 404, description = "Service not found"))
)]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<StatusInput>, JsonRejection>,
) -> Reply<service_record::Model> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    let updated = state.services.update_status(id, input).await?;
    Ok(Json(ApiResponse::ok("Service record status updated successfully", updated)))
}

/// An empty body completes the record as of now, whatever the content type.
#[utoipa::path(
    put, path = "/api/services/{id}/complete", tag = "services",
    params(("id" = String, Path, description = "Service record ID")),
    request_body = crate::openapi::CompleteInputDoc,
    responses((status = 200, description = "Marked as completed"), (status = 400, description = "Invalid completion date format"), (status = 404, description = "Service not found"))
)]
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Reply<service_record::Model> {
    let id = parse_id(&id)?;
    let input = if body.iter().all(u8::is_ascii_whitespace) {
        CompleteInput::default()
    } else {
        serde_json::from_slice::<CompleteInput>(&body).map_err(ApiError::invalid_body)?
    };
    let done = state.services.complete(id, input).await?;
    Ok(Json(ApiResponse::ok("Service marked as completed", done)))
}

#[utoipa::path(get, path = "/api/services/status", tag = "services", responses((status = 200, description = "Unfinished records past the overdue threshold, oldest first")))]
pub async fn pending_or_overdue(State(state): State<ServerState>) -> Reply<Vec<service_record::Model>> {
    let records = state.services.pending_or_overdue().await?;
    Ok(Json(ApiResponse::ok("Overdue or pending services fetched successfully", records)))
}
