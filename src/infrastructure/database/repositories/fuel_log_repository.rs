use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{contains_pattern, sea_order};
use crate::domain::{
    DomainResult, FuelLog, FuelLogFilter, FuelLogRepository as FuelLogRepositoryInterface,
    FuelLogSortField,
};
use crate::infrastructure::database::entities::fuel_log;
use crate::shared::pagination::{PageSlice, PageWindow};

pub struct FuelLogRepository {
    db: DatabaseConnection,
}

impl FuelLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, log: &FuelLog) -> DomainResult<()> {
        fuel_log::ActiveModel {
            id: Set(log.id.clone()),
            tenant_id: Set(log.tenant_id.clone()),
            vehicle_id: Set(log.vehicle_id.clone()),
            filled_at: Set(log.filled_at),
            liters: Set(log.liters),
            total_cost: Set(log.total_cost),
            odometer: Set(log.odometer),
            station: Set(log.station.clone()),
            notes: Set(log.notes.clone()),
            created_at: Set(log.created_at),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}

fn model_to_domain(model: fuel_log::Model) -> FuelLog {
    FuelLog {
        id: model.id,
        tenant_id: model.tenant_id,
        vehicle_id: model.vehicle_id,
        filled_at: model.filled_at,
        liters: model.liters,
        total_cost: model.total_cost,
        odometer: model.odometer,
        station: model.station,
        notes: model.notes,
        created_at: model.created_at,
    }
}

fn sort_column(field: FuelLogSortField) -> fuel_log::Column {
    match field {
        FuelLogSortField::FilledAt => fuel_log::Column::FilledAt,
        FuelLogSortField::Liters => fuel_log::Column::Liters,
        FuelLogSortField::TotalCost => fuel_log::Column::TotalCost,
        FuelLogSortField::Odometer => fuel_log::Column::Odometer,
    }
}

#[async_trait]
impl FuelLogRepositoryInterface for FuelLogRepository {
    async fn find_page(
        &self,
        tenant_id: &str,
        vehicle_id: &str,
        window: PageWindow,
        filter: &FuelLogFilter,
    ) -> DomainResult<PageSlice<FuelLog>> {
        let mut query = fuel_log::Entity::find()
            .filter(fuel_log::Column::TenantId.eq(tenant_id))
            .filter(fuel_log::Column::VehicleId.eq(vehicle_id));

        if let Some(q) = filter.search() {
            query = query.filter(
                Condition::any()
                    .add(fuel_log::Column::Station.like(contains_pattern(q)))
                    .add(fuel_log::Column::Notes.like(contains_pattern(q))),
            );
        }

        let total = query.clone().count(&self.db).await?;
        if window.skip >= total {
            return Ok(PageSlice::new(Vec::new(), total));
        }

        let column = sort_column(filter.sort_field().unwrap_or_default());
        let models = query
            .order_by(column, sea_order(filter.sort_order()))
            .order_by_asc(fuel_log::Column::Id)
            .offset(window.skip)
            .limit(window.take)
            .all(&self.db)
            .await?;

        Ok(PageSlice::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
        ))
    }
}
