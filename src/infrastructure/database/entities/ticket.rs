//! Ticket entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub spot_id: i32,
    pub vehicle_reg_number: String,

    /// Fare in currency units, 0 while the ticket is open
    pub price: f64,

    pub in_time: DateTimeUtc,

    #[sea_orm(nullable)]
    pub out_time: Option<DateTimeUtc>,

    pub discount_eligible: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_spot::Entity",
        from = "Column::SpotId",
        to = "super::parking_spot::Column::Id"
    )]
    ParkingSpot,
}

impl Related<super::parking_spot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
