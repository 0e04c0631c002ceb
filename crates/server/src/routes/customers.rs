use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::ApiResponse;
use models::customer;
use service::customer::domain::CustomerInput;
use service::validate::parse_id;

use crate::errors::ApiError;
use crate::state::ServerState;

type Reply<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[utoipa::path(
    post, path = "/api/customers", tag = "customers",
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 201, description = "Customer created"),
        (status = 400, description = "Missing field or email already exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<customer::Model>>), ApiError> {
    let Json(input) = body?;
    let created = state.customers.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Customer created successfully", created))))
}

#[utoipa::path(get, path = "/api/customers", tag = "customers", responses((status = 200, description = "Customers, newest first")))]
pub async fn list(State(state): State<ServerState>) -> Reply<Vec<customer::Model>> {
    let customers = state.customers.list().await?;
    Ok(Json(ApiResponse::ok("Customers fetched successfully", customers)))
}

#[utoipa::path(
    get, path = "/api/customers/{id}", tag = "customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid ID format"), (status = 404, description = "Customer not found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Reply<customer::Model> {
    let found = state.customers.get(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Customer fetched successfully", found)))
}

#[utoipa::path(
    put, path = "/api/customers/{id}", tag = "customers",
    params(("id" = String, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerInputDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Customer not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Reply<customer::Model> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    let updated = state.customers.update(id, input).await?;
    Ok(Json(ApiResponse::ok("Customer updated successfully", updated)))
}

#[utoipa::path(
    delete, path = "/api/customers/{id}", tag = "customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses((status = 200, description = "Deleted"), (status = 400, description = "Customer still owns bikes"), (status = 404, description = "Customer not found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.customers.delete(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Customer deleted successfully")))
}
