use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gallery image attached to one or more products
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Stored path, relative to the media root
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_image_link::Entity")]
    ProductLinks,
}

impl Related<super::product_image_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductLinks.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_image_link::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_image_link::Relation::ProductImage.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
