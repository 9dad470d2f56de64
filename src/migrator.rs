use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_submission_tables::Migration),
        ]
    }
}

mod m20240101_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Name).string_len(200).not_null())
                        .col(ColumnDef::new(Products::StyleNumber).string_len(50).not_null())
                        .col(ColumnDef::new(Products::Date).date().not_null())
                        .col(ColumnDef::new(Products::Description).text().not_null())
                        .col(ColumnDef::new(Products::SampleType).string_len(50).not_null())
                        .col(ColumnDef::new(Products::Category).string_len(50).not_null())
                        .col(ColumnDef::new(Products::MainCategory).string_len(50).not_null())
                        .col(
                            ColumnDef::new(Products::Price)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Image).string_len(100).not_null())
                        .to_owned(),
                )
                .await?;

            // Listings are ordered newest first
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_date")
                        .table(Products::Table)
                        .col(Products::Date)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductImages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductImages::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductImages::ImageUrl)
                                .string_len(100)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Materials::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Materials::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Materials::Material).string_len(50).not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductImagesLink::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ProductImagesLink::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(ProductImagesLink::ProductImageId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ProductImagesLink::ProductId)
                                .col(ProductImagesLink::ProductImageId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_images_link_product_id")
                                .from(ProductImagesLink::Table, ProductImagesLink::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_images_link_product_image_id")
                                .from(ProductImagesLink::Table, ProductImagesLink::ProductImageId)
                                .to(ProductImages::Table, ProductImages::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductMaterials::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ProductMaterials::ProductId).uuid().not_null())
                        .col(ColumnDef::new(ProductMaterials::MaterialId).uuid().not_null())
                        .primary_key(
                            Index::create()
                                .col(ProductMaterials::ProductId)
                                .col(ProductMaterials::MaterialId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_materials_product_id")
                                .from(ProductMaterials::Table, ProductMaterials::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_materials_material_id")
                                .from(ProductMaterials::Table, ProductMaterials::MaterialId)
                                .to(Materials::Table, Materials::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductMaterials::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductImagesLink::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Materials::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductImages::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        Name,
        StyleNumber,
        Date,
        Description,
        SampleType,
        Category,
        MainCategory,
        Price,
        Image,
    }

    #[derive(DeriveIden)]
    enum ProductImages {
        Table,
        Id,
        ImageUrl,
    }

    #[derive(DeriveIden)]
    enum Materials {
        Table,
        Id,
        Material,
    }

    #[derive(DeriveIden)]
    enum ProductImagesLink {
        Table,
        ProductId,
        ProductImageId,
    }

    #[derive(DeriveIden)]
    enum ProductMaterials {
        Table,
        ProductId,
        MaterialId,
    }
}

mod m20240101_000002_create_submission_tables {

    use super::m20240101_000001_create_catalog_tables::Products;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_submission_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ContactUs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ContactUs::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(ContactUs::Name).string_len(200).not_null())
                        .col(ColumnDef::new(ContactUs::Email).string_len(254).not_null())
                        .col(ColumnDef::new(ContactUs::Subject).string_len(200).not_null())
                        .col(ColumnDef::new(ContactUs::Message).text().not_null())
                        .col(
                            ColumnDef::new(ContactUs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContactUs::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContactUs::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Inquiries::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Inquiries::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Inquiries::Name).string_len(200).not_null())
                        .col(ColumnDef::new(Inquiries::Email).string_len(254).not_null())
                        .col(ColumnDef::new(Inquiries::Subject).string_len(200).not_null())
                        .col(ColumnDef::new(Inquiries::Message).text().not_null())
                        .col(
                            ColumnDef::new(Inquiries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Inquiries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Inquiries::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InquiryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InquiryItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InquiryItems::ProductId).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inquiry_items_product_id")
                                .from(InquiryItems::Table, InquiryItems::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inquiry_items_product_id")
                        .table(InquiryItems::Table)
                        .col(InquiryItems::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InquiryItemLinks::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(InquiryItemLinks::InquiryId).uuid().not_null())
                        .col(
                            ColumnDef::new(InquiryItemLinks::InquiryItemId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(InquiryItemLinks::InquiryId)
                                .col(InquiryItemLinks::InquiryItemId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inquiry_item_links_inquiry_id")
                                .from(InquiryItemLinks::Table, InquiryItemLinks::InquiryId)
                                .to(Inquiries::Table, Inquiries::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inquiry_item_links_inquiry_item_id")
                                .from(InquiryItemLinks::Table, InquiryItemLinks::InquiryItemId)
                                .to(InquiryItems::Table, InquiryItems::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InquiryItemLinks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InquiryItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Inquiries::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ContactUs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ContactUs {
        Table,
        Id,
        Name,
        Email,
        Subject,
        Message,
        CreatedAt,
        UpdatedAt,
        IsRead,
    }

    #[derive(DeriveIden)]
    enum Inquiries {
        Table,
        Id,
        Name,
        Email,
        Subject,
        Message,
        CreatedAt,
        UpdatedAt,
        IsRead,
    }

    #[derive(DeriveIden)]
    enum InquiryItems {
        Table,
        Id,
        ProductId,
    }

    #[derive(DeriveIden)]
    enum InquiryItemLinks {
        Table,
        InquiryId,
        InquiryItemId,
    }
}
