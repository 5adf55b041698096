use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Products: storefront filters by type, then brand
        manager
            .create_index(
                Index::create()
                    .name("idx_products_type_brand")
                    .table(Products::Table)
                    .col(Products::ProductType)
                    .col(Products::Brand)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_bike_model")
                    .table(Products::Table)
                    .col(Products::BikeModel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_products_bike_model").table(Products::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_type_brand").table(Products::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products { Table, ProductType, Brand, BikeModel }
