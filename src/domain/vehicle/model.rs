//! Vehicle read model

use chrono::{DateTime, Utc};

use crate::shared::pagination::{FilterOptions, SortKey};

/// Operational state of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleStatus {
    #[default]
    Active,
    InService,
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InService => "in_service",
            Self::Retired => "retired",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle owned by a tenant
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub tenant_id: String,
    /// Display name given by the fleet manager
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub vin: Option<String>,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Substring match over the searchable columns. Case folding is ASCII
    /// only, as with SQLite `LIKE`, so both stores count the same rows.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        [&self.name, &self.make, &self.model, &self.license_plate]
            .iter()
            .any(|field| field.to_ascii_lowercase().contains(&needle))
    }
}

/// Columns a vehicle list may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleSortField {
    Name,
    Make,
    Model,
    Year,
    LicensePlate,
    #[default]
    CreatedAt,
}

impl VehicleSortField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Make,
        Self::Model,
        Self::Year,
        Self::LicensePlate,
        Self::CreatedAt,
    ];
}

impl SortKey for VehicleSortField {
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == raw)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
            Self::LicensePlate => "license_plate",
            Self::CreatedAt => "created_at",
        }
    }
}

pub type VehicleFilter = FilterOptions<VehicleSortField>;

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: "v1".into(),
            tenant_id: "t1".into(),
            name: "Delivery Van 3".into(),
            make: "Ford".into(),
            model: "Transit".into(),
            year: 2021,
            license_plate: "AB-123-CD".into(),
            vin: None,
            status: VehicleStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn search_matches_any_searchable_column() {
        let v = vehicle();
        assert!(v.matches_search("van"));
        assert!(v.matches_search("FORD"));
        assert!(v.matches_search("transit"));
        assert!(v.matches_search("123-cd"));
        assert!(!v.matches_search("sprinter"));
    }

    #[test]
    fn search_folds_ascii_case_only() {
        let mut v = vehicle();
        v.name = "Élan Pickup".into();
        assert!(v.matches_search("Élan pickup"));
        assert!(v.matches_search("PICKUP"));
        assert!(!v.matches_search("élan"));
    }

    #[test]
    fn sort_field_names_round_trip() {
        for field in VehicleSortField::ALL {
            assert_eq!(VehicleSortField::parse(field.as_str()), Some(field));
        }
        assert_eq!(VehicleSortField::parse("vin"), None);
        assert_eq!(VehicleSortField::parse("Name"), None);
    }
}
