use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::ContactFields;

/// Product inquiry; shares the contact field set and links to zero or more items
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inquiry_item_link::Entity")]
    ItemLinks,
}

impl Related<super::inquiry_item_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemLinks.def()
    }
}

impl Related<super::inquiry_item::Entity> for Entity {
    fn to() -> RelationDef {
        super::inquiry_item_link::Relation::InquiryItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::inquiry_item_link::Relation::Inquiry.def().rev())
    }
}

impl Model {
    pub fn contact_fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }
}

impl ActiveModel {
    pub fn from_fields(id: Uuid, fields: ContactFields) -> Self {
        Self {
            id: Set(id),
            name: Set(fields.name),
            email: Set(fields.email),
            subject: Set(fields.subject),
            message: Set(fields.message),
            is_read: Set(false),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.is_read {
                active_model.is_read = Set(false);
            }
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.name, self.email, self.subject)
    }
}
