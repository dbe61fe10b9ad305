//! Create tickets table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_parking_spots::ParkingSpots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::SpotId).integer().not_null())
                    .col(
                        ColumnDef::new(Tickets::VehicleRegNumber)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Tickets::InTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::OutTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tickets::DiscountEligible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_parking_spot")
                            .from(Tickets::Table, Tickets::SpotId)
                            .to(ParkingSpots::Table, ParkingSpots::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Open ticket and history lookups by plate
        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_vehicle_reg_number")
                    .table(Tickets::Table)
                    .col(Tickets::VehicleRegNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tickets {
    Table,
    Id,
    SpotId,
    VehicleRegNumber,
    Price,
    InTime,
    OutTime,
    DiscountEligible,
}
