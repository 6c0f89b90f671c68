//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Vehicle;

/// Vehicle API representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: String,
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    /// active, in_service, retired
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name,
            make: v.make,
            model: v.model,
            year: v.year,
            license_plate: v.license_plate,
            vin: v.vin,
            status: v.status.as_str().to_string(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}
