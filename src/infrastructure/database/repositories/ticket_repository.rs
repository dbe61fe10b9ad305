//! SeaORM implementation of TicketStore

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::spot_repository::{db_err, model_to_domain as spot_to_domain};
use crate::domain::{DomainError, DomainResult, Ticket, TicketStore};
use crate::infrastructure::database::entities::{parking_spot, ticket};

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_one(&self, query: Select<ticket::Entity>) -> DomainResult<Option<Ticket>> {
        let row = query
            .find_also_related(parking_spot::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        row.map(|(t, spot)| model_to_domain(t, spot)).transpose()
    }

    async fn fetch_all(&self, query: Select<ticket::Entity>) -> DomainResult<Vec<Ticket>> {
        let rows = query
            .find_also_related(parking_spot::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        rows.into_iter()
            .map(|(t, spot)| model_to_domain(t, spot))
            .collect()
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(t: ticket::Model, spot: Option<parking_spot::Model>) -> DomainResult<Ticket> {
    let spot = spot.ok_or_else(|| {
        DomainError::Storage(format!(
            "ticket {} references missing spot {}",
            t.id, t.spot_id
        ))
    })?;

    Ok(Ticket {
        id: t.id,
        spot: spot_to_domain(spot)?,
        vehicle_reg_number: t.vehicle_reg_number,
        in_time: t.in_time,
        out_time: t.out_time,
        price: t.price,
        discount_eligible: t.discount_eligible,
    })
}

fn by_vehicle(vehicle_reg_number: &str) -> Select<ticket::Entity> {
    ticket::Entity::find().filter(ticket::Column::VehicleRegNumber.eq(vehicle_reg_number))
}

// ── TicketStore impl ────────────────────────────────────────────

#[async_trait]
impl TicketStore for SeaOrmTicketRepository {
    async fn insert(&self, t: Ticket) -> DomainResult<Ticket> {
        debug!("Inserting ticket for vehicle: {}", t.vehicle_reg_number);

        let model = ticket::ActiveModel {
            id: NotSet,
            spot_id: Set(t.spot.id),
            vehicle_reg_number: Set(t.vehicle_reg_number.clone()),
            price: Set(t.price),
            in_time: Set(t.in_time),
            out_time: Set(t.out_time),
            discount_eligible: Set(t.discount_eligible),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(Ticket { id: saved.id, ..t })
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>> {
        self.fetch_one(ticket::Entity::find_by_id(id)).await
    }

    async fn update(&self, t: Ticket) -> DomainResult<()> {
        debug!("Updating ticket: {}", t.id);

        let existing = ticket::Entity::find_by_id(t.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Ticket",
                field: "id",
                value: t.id.to_string(),
            });
        }

        let model = ticket::ActiveModel {
            id: Set(t.id),
            spot_id: Set(t.spot.id),
            vehicle_reg_number: Set(t.vehicle_reg_number),
            price: Set(t.price),
            in_time: Set(t.in_time),
            out_time: Set(t.out_time),
            discount_eligible: Set(t.discount_eligible),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_open_for_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> DomainResult<Option<Ticket>> {
        self.fetch_one(by_vehicle(vehicle_reg_number).filter(ticket::Column::OutTime.is_null()))
            .await
    }

    async fn find_latest_for_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> DomainResult<Option<Ticket>> {
        self.fetch_one(
            by_vehicle(vehicle_reg_number)
                .order_by_desc(ticket::Column::InTime)
                .order_by_desc(ticket::Column::Id),
        )
        .await
    }

    async fn find_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>> {
        self.fetch_all(
            by_vehicle(vehicle_reg_number)
                .order_by_desc(ticket::Column::InTime)
                .order_by_desc(ticket::Column::Id),
        )
        .await
    }

    async fn count_for_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<u64> {
        by_vehicle(vehicle_reg_number)
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
