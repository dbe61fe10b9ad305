//! SeaORM implementation of SpotStore

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, ParkingSpot, SpotStore, VehicleCategory};
use crate::infrastructure::database::entities::parking_spot;
use crate::support::errors::InfraError;

pub struct SeaOrmSpotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: parking_spot::Model) -> DomainResult<ParkingSpot> {
    Ok(ParkingSpot {
        id: m.id,
        category: m.category.parse()?,
        is_available: m.is_available,
    })
}

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::from(e).into()
}

// ── SpotStore impl ──────────────────────────────────────────────

#[async_trait]
impl SpotStore for SeaOrmSpotRepository {
    async fn save(&self, spot: ParkingSpot) -> DomainResult<()> {
        debug!("Saving parking spot: {}", spot.id);

        let model = parking_spot::ActiveModel {
            id: Set(spot.id),
            category: Set(spot.category.as_str().to_string()),
            is_available: Set(spot.is_available),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>> {
        parking_spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingSpot>> {
        let models = parking_spot::Entity::find()
            .order_by_asc(parking_spot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_lowest_available(
        &self,
        category: VehicleCategory,
    ) -> DomainResult<Option<ParkingSpot>> {
        parking_spot::Entity::find()
            .filter(parking_spot::Column::Category.eq(category.as_str()))
            .filter(parking_spot::Column::IsAvailable.eq(true))
            .order_by_asc(parking_spot::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn count_available(&self, category: VehicleCategory) -> DomainResult<u64> {
        parking_spot::Entity::find()
            .filter(parking_spot::Column::Category.eq(category.as_str()))
            .filter(parking_spot::Column::IsAvailable.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn set_availability(&self, id: i32, is_available: bool) -> DomainResult<()> {
        debug!("Setting spot {} availability to {}", id, is_available);

        let existing = parking_spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: parking_spot::ActiveModel = existing.into();
        active.is_available = Set(is_available);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
