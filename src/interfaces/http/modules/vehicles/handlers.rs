//! Vehicle API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::dto::VehicleDto;
use crate::application::FleetService;
use crate::domain::VehicleFilter;
use crate::interfaces::http::common::{domain_error, paged_response, ApiError, ApiResponse, ListQuery};
use crate::shared::pagination::{Normalizer, Pagination, RawListParams};

#[derive(Clone)]
pub struct VehicleHandlerState {
    pub fleet: Arc<FleetService>,
    pub normalizer: Normalizer,
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants/{tenant_id}/vehicles",
    tag = "Vehicles",
    params(
        ("tenant_id" = String, Path, description = "Tenant ID"),
        RawListParams
    ),
    responses(
        (status = 200, description = "Vehicle page", body = Pagination<VehicleDto>,
            headers(("link" = String, description = "first/prev/next/last page URLs"))),
        (status = 503, description = "Storage unavailable", body = ApiResponse<String>)
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleHandlerState>,
    Path(tenant_id): Path<String>,
    ListQuery(raw): ListQuery,
) -> Result<Response, ApiError> {
    let filter: VehicleFilter = state.normalizer.filter(&raw);
    let page = state
        .fleet
        .list_vehicles(&tenant_id, &filter)
        .await
        .map_err(domain_error)?;

    let base = format!(
        "/api/v1/tenants/{}/vehicles",
        urlencoding::encode(&tenant_id)
    );
    Ok(paged_response(page.map(VehicleDto::from), &filter, &base))
}
