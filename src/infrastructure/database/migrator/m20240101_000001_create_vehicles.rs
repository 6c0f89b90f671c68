//! Create vehicles table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::TenantId).string_len(64).not_null())
                    .col(ColumnDef::new(Vehicles::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Vehicles::Make).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .col(ColumnDef::new(Vehicles::LicensePlate).string_len(32).not_null())
                    .col(ColumnDef::new(Vehicles::Vin).string_len(17).null())
                    .col(
                        ColumnDef::new(Vehicles::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    TenantId,
    Name,
    Make,
    Model,
    Year,
    LicensePlate,
    Vin,
    Status,
    CreatedAt,
    UpdatedAt,
}
