//! Create `company` table.
//! The unique index on `isin` is the authoritative guard against duplicate
//! listings; the service layer check only turns the common case into a typed error.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string(Company::Name).not_null())
                    .col(string(Company::Exchange).not_null())
                    .col(string(Company::Ticker).not_null())
                    .col(string_len(Company::Isin, 12).not_null())
                    .col(string_null(Company::Website))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_company_isin_unique")
                    .table(Company::Table)
                    .col(Company::Isin)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
    Name,
    Exchange,
    Ticker,
    Isin,
    Website,
}
