//! Create `products` table.
//!
//! `image` holds a large text blob (base64 data URL); accessory-specific
//! columns are nullable and `product_type` defaults to `accessory`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_len(Products::Name, 255))
                    .col(text_null(Products::Image))
                    .col(string_len_null(Products::Description, 1000))
                    .col(integer(Products::Price))
                    .col(string_len(Products::ProductType, 20).default("accessory"))
                    .col(string_len_null(Products::Brand, 50))
                    .col(string_len_null(Products::PartType, 50))
                    .col(string_len_null(Products::BikeModel, 50))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products { Table, Id, Name, Image, Description, Price, ProductType, Brand, PartType, BikeModel }
