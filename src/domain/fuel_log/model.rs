//! Fuel log read model

use chrono::{DateTime, Utc};

use crate::shared::pagination::{FilterOptions, SortKey};

/// One refuelling of a vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct FuelLog {
    pub id: String,
    pub tenant_id: String,
    pub vehicle_id: String,
    pub filled_at: DateTime<Utc>,
    pub liters: f64,
    /// Total price in the smallest currency unit (e.g. cents)
    pub total_cost: i64,
    /// Odometer reading in kilometres at fill-up
    pub odometer: i64,
    pub station: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FuelLog {
    /// ASCII-case-insensitive, matching SQLite `LIKE`.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        [&self.station, &self.notes]
            .into_iter()
            .flatten()
            .any(|field| field.to_ascii_lowercase().contains(&needle))
    }
}

/// Columns a fuel log list may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuelLogSortField {
    #[default]
    FilledAt,
    Liters,
    TotalCost,
    Odometer,
}

impl FuelLogSortField {
    pub const ALL: [Self; 4] = [Self::FilledAt, Self::Liters, Self::TotalCost, Self::Odometer];
}

impl SortKey for FuelLogSortField {
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == raw)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::FilledAt => "filled_at",
            Self::Liters => "liters",
            Self::TotalCost => "total_cost",
            Self::Odometer => "odometer",
        }
    }
}

pub type FuelLogFilter = FilterOptions<FuelLogSortField>;
