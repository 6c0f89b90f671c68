//! Fuel log DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FuelLog;

/// Fuel log API representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FuelLogDto {
    pub id: String,
    pub vehicle_id: String,
    pub filled_at: DateTime<Utc>,
    pub liters: f64,
    /// Smallest currency unit
    pub total_cost: i64,
    /// Kilometres
    pub odometer: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<FuelLog> for FuelLogDto {
    fn from(l: FuelLog) -> Self {
        Self {
            id: l.id,
            vehicle_id: l.vehicle_id,
            filled_at: l.filled_at,
            liters: l.liters,
            total_cost: l.total_cost,
            odometer: l.odometer,
            station: l.station,
            notes: l.notes,
        }
    }
}
