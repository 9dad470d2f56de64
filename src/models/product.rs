use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::format_price;
use crate::config::MediaConfig;
use crate::entities::{material, product, product_image};

/// Product as it appears in a listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub style_number: String,
    pub date: NaiveDate,
    pub category: String,
    pub main_category: String,
    /// Decimal string with two places, e.g. `"19.99"`
    #[schema(example = "19.99")]
    pub price: String,
    /// URL of the primary image, `null` when none is stored
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageResponse {
    pub id: Uuid,
    pub image_url: Option<String>,
}

impl ImageResponse {
    pub fn from_model(model: product_image::Model, media: &MediaConfig) -> Self {
        Self {
            id: model.id,
            image_url: media.url_for(&model.image_url),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaterialResponse {
    pub id: Uuid,
    pub material: String,
}

impl From<material::Model> for MaterialResponse {
    fn from(model: material::Model) -> Self {
        Self {
            id: model.id,
            material: model.material,
        }
    }
}

/// Full product record with its gallery and materials
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub style_number: String,
    pub date: NaiveDate,
    pub description: String,
    pub sample_type: String,
    pub category: String,
    pub main_category: String,
    #[schema(example = "19.99")]
    pub price: String,
    pub image: Option<String>,
    pub images: Vec<ImageResponse>,
    pub materials: Vec<MaterialResponse>,
}

impl ProductDetail {
    pub fn new(
        product: product::Model,
        images: Vec<product_image::Model>,
        materials: Vec<material::Model>,
        media: &MediaConfig,
    ) -> Self {
        Self {
            id: product.id,
            image: media.url_for(&product.image),
            price: format_price(product.price),
            name: product.name,
            style_number: product.style_number,
            date: product.date,
            description: product.description,
            sample_type: product.sample_type,
            category: product.category,
            main_category: product.main_category,
            images: images
                .into_iter()
                .map(|image| ImageResponse::from_model(image, media))
                .collect(),
            materials: materials.into_iter().map(MaterialResponse::from).collect(),
        }
    }
}

/// Pagination metadata for product listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(current_page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            current_page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size.max(1)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    pub products: Vec<ProductSummary>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    pub product: ProductDetail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).total_pages, 2);
        assert_eq!(PaginationMeta::new(3, 1, 3).total_pages, 3);
    }

    #[test]
    fn detail_renders_media_urls_and_price() {
        let media = MediaConfig::default();
        let product = product::Model {
            id: Uuid::new_v4(),
            name: "Linen Shirt".into(),
            style_number: "LS-01".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            description: "Light".into(),
            sample_type: "proto".into(),
            category: "shirts".into(),
            main_category: "apparel".into(),
            price: dec!(40),
            image: "product_images/ls.jpg".into(),
        };
        let image = product_image::Model {
            id: Uuid::new_v4(),
            image_url: String::new(),
        };

        let detail = ProductDetail::new(product, vec![image], vec![], &media);
        assert_eq!(detail.price, "40.00");
        assert_eq!(detail.image.as_deref(), Some("/media/product_images/ls.jpg"));
        assert_eq!(detail.images[0].image_url, None);
        assert!(detail.materials.is_empty());
    }
}
