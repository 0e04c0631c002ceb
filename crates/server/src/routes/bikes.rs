use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::ApiResponse;
use models::bike;
use service::bike::domain::BikeInput;
use service::validate::parse_id;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/api/bikes", tag = "bikes",
    request_body = crate::openapi::BikeInputDoc,
    responses(
        (status = 201, description = "Bike added"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<BikeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<bike::Model>>), ApiError> {
    let Json(input) = body?;
    let created = state.bikes.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Bike added successfully", created))))
}

#[utoipa::path(get, path = "/api/bikes", tag = "bikes", responses((status = 200, description = "All bikes")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<ApiResponse<Vec<bike::Model>>>, ApiError> {
    let bikes = state.bikes.list().await?;
    Ok(Json(ApiResponse::ok("Bikes fetched successfully", bikes)))
}

#[utoipa::path(
    get, path = "/api/bikes/{id}", tag = "bikes",
    params(("id" = String, Path, description = "Bike ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Bike not found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<ApiResponse<bike::Model>>, ApiError> {
    let found = state.bikes.get(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Bike fetched successfully", found)))
}

#[utoipa::path(
    delete, path = "/api/bikes/{id}", tag = "bikes",
    params(("id" = String, Path, description = "Bike ID")),
    responses((status = 200, description = "Deleted"), (status = 400, description = "Bike has service records"), (status = 404, description = "Bike not found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.bikes.delete(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Bike deleted successfully")))
}
