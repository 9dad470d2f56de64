use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inquiry to inquiry item association
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiry_item_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub inquiry_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub inquiry_item_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inquiry::Entity",
        from = "Column::InquiryId",
        to = "super::inquiry::Column::Id",
        on_delete = "Cascade"
    )]
    Inquiry,
    #[sea_orm(
        belongs_to = "super::inquiry_item::Entity",
        from = "Column::InquiryItemId",
        to = "super::inquiry_item::Column::Id",
        on_delete = "Cascade"
    )]
    InquiryItem,
}

impl Related<super::inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiry.def()
    }
}

impl Related<super::inquiry_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InquiryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
