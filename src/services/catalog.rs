use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, ModelTrait, PaginatorTrait, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    config::MediaConfig,
    entities::{material, product, product_image},
    errors::ServiceError,
    models::{format_price, PaginationMeta, ProductDetail, ProductSummary},
};

pub const INVALID_PAGINATION: &str = "Invalid pagination parameters";

/// Listing projection; the detail-only columns are never loaded
#[derive(Debug, FromQueryResult)]
struct ProductSummaryRow {
    id: Uuid,
    name: String,
    style_number: String,
    date: NaiveDate,
    category: String,
    main_category: String,
    price: Decimal,
    image: String,
}

/// Row offset of `page`, or `None` when the window cannot be expressed as a
/// signed 64-bit SQL `LIMIT`/`OFFSET`.
fn page_offset(page: u64, page_size: u64) -> Option<u64> {
    if page < 1 || page_size < 1 || page_size > SQL_MAX_ROWS {
        return None;
    }
    (page - 1)
        .checked_mul(page_size)
        .filter(|offset| *offset <= SQL_MAX_ROWS)
}

const SQL_MAX_ROWS: u64 = i64::MAX as u64;

/// One page of the product listing
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub pagination: PaginationMeta,
}

/// Read-only access to the product catalog
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
    media: MediaConfig,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>, media: MediaConfig) -> Self {
        Self { db, media }
    }

    /// Products newest first, `page_size` at a time. `page` starts at 1.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<ProductPage, ServiceError> {
        let offset = page_offset(page, page_size)
            .ok_or_else(|| ServiceError::ValidationError(INVALID_PAGINATION.to_string()))?;

        let rows = product::Entity::find()
            .select_only()
            .columns([
                product::Column::Id,
                product::Column::Name,
                product::Column::StyleNumber,
                product::Column::Date,
                product::Column::Category,
                product::Column::MainCategory,
                product::Column::Price,
                product::Column::Image,
            ])
            .order_by_desc(product::Column::Date)
            .order_by_asc(product::Column::Id)
            .offset(offset)
            .limit(page_size)
            .into_model::<ProductSummaryRow>()
            .all(&*self.db)
            .await?;

        let total_items = product::Entity::find().count(&*self.db).await?;
        debug!(page, page_size, total_items, returned = rows.len(), "Listed products");

        let products = rows
            .into_iter()
            .map(|row| ProductSummary {
                id: row.id,
                image: self.media.url_for(&row.image),
                price: format_price(row.price),
                name: row.name,
                style_number: row.style_number,
                date: row.date,
                category: row.category,
                main_category: row.main_category,
            })
            .collect();

        Ok(ProductPage {
            products,
            pagination: PaginationMeta::new(page, page_size, total_items),
        })
    }

    /// Full product with its images and materials. Ids that do not parse are
    /// reported the same way as ids that match nothing.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<ProductDetail, ServiceError> {
        let not_found = || ServiceError::NotFound(format!("Product not found with id: {}", id));

        let product_id = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;

        let product = product::Entity::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(not_found)?;

        let images = product
            .find_related(product_image::Entity)
            .all(&*self.db)
            .await?;
        let materials = product
            .find_related(material::Entity)
            .all(&*self.db)
            .await?;

        Ok(ProductDetail::new(product, images, materials, &self.media))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts_whole_pages_before_the_requested_one() {
        assert_eq!(page_offset(1, 10), Some(0));
        assert_eq!(page_offset(3, 10), Some(20));
    }

    #[test]
    fn offset_rejects_zero_and_out_of_range_windows() {
        assert_eq!(page_offset(0, 10), None);
        assert_eq!(page_offset(1, 0), None);
        assert_eq!(page_offset(i64::MAX as u64, 10), None);
        assert_eq!(page_offset(3, i64::MAX as u64), None);
        assert_eq!(page_offset(1, i64::MAX as u64), Some(0));
    }
}
