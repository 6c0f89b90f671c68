//! Vehicle entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum VehicleStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "in_service")]
    InService,
    #[sea_orm(string_value = "retired")]
    Retired,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tenant_id: String,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fuel_log::Entity")]
    FuelLogs,
}

impl Related<super::fuel_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FuelLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
