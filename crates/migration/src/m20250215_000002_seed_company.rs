//! Seed the reference companies.
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

// (id, name, exchange, ticker, isin, website)
const REFERENCE_COMPANIES: [(i32, &str, &str, &str, &str, Option<&str>); 5] = [
    (1, "Apple Inc.", "NASDAQ", "AAPL", "US0378331005", Some("http://www.apple.com")),
    (2, "British Airways Plc", "Pink Sheets", "BAIRY", "US1104193065", None),
    (3, "Heineken NV", "Euronext Amsterdam", "HEIA", "NL0000009165", None),
    (4, "Panasonic Corp", "Tokyo Stock Exchange", "6752", "JP3866800000", Some("http://www.panasonic.co.jp")),
    (5, "Porsche Automobil", "Deutsche Börse", "PAH3", "DE000PAH0038", Some("https://www.porsche.com/")),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Company::Table)
            .columns([
                Company::Id,
                Company::Name,
                Company::Exchange,
                Company::Ticker,
                Company::Isin,
                Company::Website,
            ])
            .on_conflict(OnConflict::column(Company::Id).do_nothing().to_owned());
        for (id, name, exchange, ticker, isin, website) in REFERENCE_COMPANIES {
            insert
                .values([
                    id.into(),
                    name.into(),
                    exchange.into(),
                    ticker.into(),
                    isin.into(),
                    website.map(str::to_string).into(),
                ])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        manager.exec_stmt(insert).await?;

        // Explicit ids leave the serial sequence behind; move it past the seeded rows.
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared(
                    "SELECT setval(pg_get_serial_sequence('company', 'id'), (SELECT MAX(id) FROM company))",
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<i32> = REFERENCE_COMPANIES.iter().map(|c| c.0).collect();
        let delete = Query::delete()
            .from_table(Company::Table)
            .and_where(Expr::col(Company::Id).is_in(ids))
            .to_owned();
        manager.exec_stmt(delete).await
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
