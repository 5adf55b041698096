//! Create `users` table.
//!
//! Usernames are unique; passwords are stored only as argon2 PHC strings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Uname, 64).unique_key())
                    .col(string_len(Users::PasswordHash, 255))
                    .col(string_len(Users::Fname, 64))
                    .col(string_len_null(Users::Lname, 64))
                    .col(string_len_null(Users::Email, 255))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Uname, PasswordHash, Fname, Lname, Email }
