use sea_orm::entity::prelude::*;
use sea_orm::SqlErr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub exchange: String,
    pub ticker: String,
    #[sea_orm(unique)]
    pub isin: String,
    pub website: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Find a company by its ISIN.
pub async fn find_by_isin<C: ConnectionTrait>(db: &C, isin: &str) -> Result<Option<Model>, DbErr> {
    Entity::find().filter(Column::Isin.eq(isin)).one(db).await
}

/// Whether a database error is a violation of a unique index (e.g. `idx_company_isin_unique`).
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
