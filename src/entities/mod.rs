//! Database entities for the catalog and visitor submissions.

pub mod contact_us;
pub mod inquiry;
pub mod inquiry_item;
pub mod inquiry_item_link;
pub mod material;
pub mod product;
pub mod product_image;
pub mod product_image_link;
pub mod product_material;
