//! Fuel log API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::dto::FuelLogDto;
use crate::application::FleetService;
use crate::domain::FuelLogFilter;
use crate::interfaces::http::common::{domain_error, paged_response, ApiError, ApiResponse, ListQuery};
use crate::shared::pagination::{Normalizer, Pagination, RawListParams};

#[derive(Clone)]
pub struct FuelLogHandlerState {
    pub fleet: Arc<FleetService>,
    pub normalizer: Normalizer,
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants/{tenant_id}/vehicles/{vehicle_id}/fuel-logs",
    tag = "Fuel Logs",
    params(
        ("tenant_id" = String, Path, description = "Tenant ID"),
        ("vehicle_id" = String, Path, description = "Vehicle ID"),
        RawListParams
    ),
    responses(
        (status = 200, description = "Fuel log page", body = Pagination<FuelLogDto>,
            headers(("link" = String, description = "first/prev/next/last page URLs"))),
        (status = 404, description = "Vehicle not found for tenant", body = ApiResponse<String>),
        (status = 503, description = "Storage unavailable", body = ApiResponse<String>)
    )
)]
pub async fn list_fuel_logs(
    State(state): State<FuelLogHandlerState>,
    Path((tenant_id, vehicle_id)): Path<(String, String)>,
    ListQuery(raw): ListQuery,
) -> Result<Response, ApiError> {
    let filter: FuelLogFilter = state.normalizer.filter(&raw);
    let page = state
        .fleet
        .list_fuel_logs(&tenant_id, &vehicle_id, &filter)
        .await
        .map_err(domain_error)?;

    let base = format!(
        "/api/v1/tenants/{}/vehicles/{}/fuel-logs",
        urlencoding::encode(&tenant_id),
        urlencoding::encode(&vehicle_id)
    );
    Ok(paged_response(page.map(FuelLogDto::from), &filter, &base))
}
