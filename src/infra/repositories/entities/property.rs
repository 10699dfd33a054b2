//! Property listing entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::user;
use crate::domain::{Property, PropertyStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: Option<f64>,
    pub property_type: String,
    pub location: String,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub owner_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Join a listing row with its (eagerly loaded) owner row.
pub fn into_domain(model: Model, owner: Option<user::Model>) -> Property {
    Property {
        id: model.id,
        title: model.title,
        description: model.description,
        price: model.price,
        property_type: model.property_type,
        location: model.location,
        image_url: model.image_url,
        status: PropertyStatus::from(model.status.as_str()),
        created_at: model.created_at,
        owner_id: model.owner_id,
        owner: owner.map(Into::into),
    }
}
