use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Product name
    pub name: String,

    /// Manufacturer style number
    pub style_number: String,

    /// Catalog date; listings are ordered newest first
    pub date: NaiveDate,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub sample_type: String,

    pub category: String,

    pub main_category: String,

    /// Unit price, two decimal places
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,

    /// Stored path of the primary image, relative to the media root
    pub image: String,
}

/// Product entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_image_link::Entity")]
    ImageLinks,
    #[sea_orm(has_many = "super::product_material::Entity")]
    MaterialLinks,
    #[sea_orm(has_many = "super::inquiry_item::Entity")]
    InquiryItems,
}

impl Related<super::product_image_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImageLinks.def()
    }
}

impl Related<super::product_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialLinks.def()
    }
}

impl Related<super::inquiry_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InquiryItems.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_image_link::Relation::ProductImage.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_image_link::Relation::Product.def().rev())
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_material::Relation::Material.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_material::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
