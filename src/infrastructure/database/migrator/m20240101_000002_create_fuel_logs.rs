//! Create fuel_logs table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FuelLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FuelLogs::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FuelLogs::TenantId).string_len(64).not_null())
                    .col(ColumnDef::new(FuelLogs::VehicleId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(FuelLogs::FilledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FuelLogs::Liters).double().not_null())
                    .col(
                        ColumnDef::new(FuelLogs::TotalCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FuelLogs::Odometer).big_integer().not_null())
                    .col(ColumnDef::new(FuelLogs::Station).string_len(255).null())
                    .col(ColumnDef::new(FuelLogs::Notes).text().null())
                    .col(
                        ColumnDef::new(FuelLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fuel_logs_vehicle")
                            .from(FuelLogs::Table, FuelLogs::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FuelLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FuelLogs {
    Table,
    Id,
    TenantId,
    VehicleId,
    FilledAt,
    Liters,
    TotalCost,
    Odometer,
    Station,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}
