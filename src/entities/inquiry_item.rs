use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product named by an inquiry. Removed together with its product.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiry_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(has_many = "super::inquiry_item_link::Entity")]
    InquiryLinks,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::inquiry_item_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InquiryLinks.def()
    }
}

impl Related<super::inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        super::inquiry_item_link::Relation::Inquiry.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::inquiry_item_link::Relation::InquiryItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
