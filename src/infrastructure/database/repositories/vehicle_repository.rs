use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{contains_pattern, sea_order};
use crate::domain::{
    DomainResult, Vehicle, VehicleFilter, VehicleRepository as VehicleRepositoryInterface,
    VehicleSortField, VehicleStatus,
};
use crate::infrastructure::database::entities::vehicle;
use crate::shared::pagination::{PageSlice, PageWindow};

pub struct VehicleRepository {
    db: DatabaseConnection,
}

impl VehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a vehicle row. Used by seeding and tests; the HTTP surface is
    /// read-only.
    pub async fn insert(&self, v: &Vehicle) -> DomainResult<()> {
        vehicle::ActiveModel {
            id: Set(v.id.clone()),
            tenant_id: Set(v.tenant_id.clone()),
            name: Set(v.name.clone()),
            make: Set(v.make.clone()),
            model: Set(v.model.clone()),
            year: Set(v.year),
            license_plate: Set(v.license_plate.clone()),
            vin: Set(v.vin.clone()),
            status: Set(domain_status_to_entity(v.status)),
            created_at: Set(v.created_at),
            updated_at: Set(v.updated_at),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: vehicle::VehicleStatus) -> VehicleStatus {
    match status {
        vehicle::VehicleStatus::Active => VehicleStatus::Active,
        vehicle::VehicleStatus::InService => VehicleStatus::InService,
        vehicle::VehicleStatus::Retired => VehicleStatus::Retired,
    }
}

fn domain_status_to_entity(status: VehicleStatus) -> vehicle::VehicleStatus {
    match status {
        VehicleStatus::Active => vehicle::VehicleStatus::Active,
        VehicleStatus::InService => vehicle::VehicleStatus::InService,
        VehicleStatus::Retired => vehicle::VehicleStatus::Retired,
    }
}

fn model_to_domain(model: vehicle::Model) -> Vehicle {
    Vehicle {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        make: model.make,
        model: model.model,
        year: model.year,
        license_plate: model.license_plate,
        vin: model.vin,
        status: entity_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn sort_column(field: VehicleSortField) -> vehicle::Column {
    match field {
        VehicleSortField::Name => vehicle::Column::Name,
        VehicleSortField::Make => vehicle::Column::Make,
        VehicleSortField::Model => vehicle::Column::Model,
        VehicleSortField::Year => vehicle::Column::Year,
        VehicleSortField::LicensePlate => vehicle::Column::LicensePlate,
        VehicleSortField::CreatedAt => vehicle::Column::CreatedAt,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl VehicleRepositoryInterface for VehicleRepository {
    async fn find_page(
        &self,
        tenant_id: &str,
        window: PageWindow,
        filter: &VehicleFilter,
    ) -> DomainResult<PageSlice<Vehicle>> {
        let mut query = vehicle::Entity::find().filter(vehicle::Column::TenantId.eq(tenant_id));

        if let Some(q) = filter.search() {
            query = query.filter(
                Condition::any()
                    .add(vehicle::Column::Name.like(contains_pattern(q)))
                    .add(vehicle::Column::Make.like(contains_pattern(q)))
                    .add(vehicle::Column::Model.like(contains_pattern(q)))
                    .add(vehicle::Column::LicensePlate.like(contains_pattern(q))),
            );
        }

        let total = query.clone().count(&self.db).await?;
        if window.skip >= total {
            return Ok(PageSlice::new(Vec::new(), total));
        }

        let column = sort_column(filter.sort_field().unwrap_or_default());
        let models = query
            .order_by(column, sea_order(filter.sort_order()))
            .order_by_asc(vehicle::Column::Id)
            .offset(window.skip)
            .limit(window.take)
            .all(&self.db)
            .await?;

        Ok(PageSlice::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
        ))
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id.to_string())
            .filter(vehicle::Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }
}
