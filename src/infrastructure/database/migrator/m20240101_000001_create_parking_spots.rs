//! Create parking_spots table
//!
//! One row per physical spot. Rows are seeded once at provisioning and
//! never deleted.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSpots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSpots::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingSpots::Category)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingSpots::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Lowest free spot lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_spots_category_available")
                    .table(ParkingSpots::Table)
                    .col(ParkingSpots::Category)
                    .col(ParkingSpots::IsAvailable)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSpots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingSpots {
    Table,
    Id,
    Category,
    IsAvailable,
}
