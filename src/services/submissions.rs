use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::{contact_us, inquiry, inquiry_item, inquiry_item_link, product},
    errors::{FieldErrors, ServiceError},
    models::{
        ContactSubmission, InquiryItemSubmission, InquiryLine, InquiryRecord, InquirySubmission,
        REQUIRED_MESSAGE,
    },
    notifications::NotificationDispatcher,
};

/// A stored submission and whether the administrator was told about it
#[derive(Debug, Clone)]
pub struct Submitted<T> {
    pub record: T,
    pub notified: bool,
}

/// Accepts contact messages and inquiries from site visitors
#[derive(Clone)]
pub struct SubmissionService {
    db: Arc<DatabaseConnection>,
    notifier: NotificationDispatcher,
}

impl SubmissionService {
    pub fn new(db: Arc<DatabaseConnection>, notifier: NotificationDispatcher) -> Self {
        Self { db, notifier }
    }

    /// Validates and stores a contact message, then notifies the administrator.
    #[instrument(skip(self, submission))]
    pub async fn submit_contact(
        &self,
        submission: ContactSubmission,
    ) -> Result<Submitted<contact_us::Model>, ServiceError> {
        let fields = submission
            .into_fields()
            .map_err(ServiceError::InvalidSubmission)?;

        let contact = contact_us::ActiveModel::from_fields(Uuid::new_v4(), fields)
            .insert(&*self.db)
            .await?;
        info!(contact_id = %contact.id, "Stored contact message: {}", contact);

        let notified = self.notifier.notify_contact(&contact).await;
        Ok(Submitted {
            record: contact,
            notified,
        })
    }

    /// Validates and stores an inquiry with its items in one transaction, then
    /// notifies the administrator.
    #[instrument(skip(self, submission))]
    pub async fn submit_inquiry(
        &self,
        submission: InquirySubmission,
    ) -> Result<Submitted<InquiryRecord>, ServiceError> {
        let InquirySubmission { contact, items } = submission;

        let mut errors = FieldErrors::new();
        let fields = contact
            .into_fields()
            .map_err(|invalid| errors.merge(invalid))
            .ok();
        let products = self
            .resolve_items(items.unwrap_or_default(), &mut errors)
            .await?;

        let fields = match fields {
            Some(fields) if errors.is_empty() => fields,
            _ => return Err(ServiceError::InvalidSubmission(errors)),
        };

        let txn = self.db.begin().await?;

        let inquiry = inquiry::ActiveModel::from_fields(Uuid::new_v4(), fields)
            .insert(&txn)
            .await?;

        let mut lines = Vec::with_capacity(products.len());
        for product in products {
            let item = inquiry_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                product_id: Set(product.id),
            }
            .insert(&txn)
            .await?;

            inquiry_item_link::Entity::insert(inquiry_item_link::ActiveModel {
                inquiry_id: Set(inquiry.id),
                inquiry_item_id: Set(item.id),
            })
            .exec_without_returning(&txn)
            .await?;

            lines.push(InquiryLine { item, product });
        }

        txn.commit().await?;
        info!(
            inquiry_id = %inquiry.id,
            items = lines.len(),
            "Stored inquiry: {}",
            inquiry
        );

        let record = InquiryRecord { inquiry, lines };
        let notified = self.notifier.notify_inquiry(&record).await;
        Ok(Submitted { record, notified })
    }

    /// Loads a stored inquiry with its items and their products
    #[instrument(skip(self))]
    pub async fn find_inquiry(&self, id: Uuid) -> Result<Option<InquiryRecord>, ServiceError> {
        let Some(inquiry) = inquiry::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let lines = inquiry
            .find_related(inquiry_item::Entity)
            .find_also_related(product::Entity)
            .all(&*self.db)
            .await?
            .into_iter()
            .filter_map(|(item, product)| product.map(|product| InquiryLine { item, product }))
            .collect();

        Ok(Some(InquiryRecord { inquiry, lines }))
    }

    /// Resolves each item to its product, in order. Problems are recorded in
    /// `errors` under `items[i].product`.
    async fn resolve_items(
        &self,
        items: Vec<InquiryItemSubmission>,
        errors: &mut FieldErrors,
    ) -> Result<Vec<product::Model>, ServiceError> {
        let mut requested = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let key = format!("items[{}].product", index);
            match item.product {
                None => errors.add(key, REQUIRED_MESSAGE),
                Some(raw) => match Uuid::parse_str(raw.trim()) {
                    Ok(id) => requested.push((key, id)),
                    Err(_) => errors.add(key, "Must be a valid UUID."),
                },
            }
        }

        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = requested.iter().map(|(_, id)| *id).collect();
        let found: HashMap<Uuid, product::Model> = product::Entity::find()
            .filter(product::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let mut products = Vec::with_capacity(requested.len());
        for (key, id) in requested {
            match found.get(&id) {
                Some(product) => products.push(product.clone()),
                None => errors.add(
                    key,
                    format!("Invalid pk \"{}\" - object does not exist.", id),
                ),
            }
        }
        Ok(products)
    }
}
