use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set};

use models::company;

use crate::company::domain::{Company, CompanyDraft};
use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

/// Map a write error, folding the unique ISIN index into the typed duplicate error.
fn map_write_err(err: DbErr, isin: &str) -> ServiceError {
    if company::is_unique_violation(&err) {
        ServiceError::DuplicateKey(isin.to_string())
    } else {
        ServiceError::Db(err.to_string())
    }
}

fn active_model(c: &Company) -> company::ActiveModel {
    company::ActiveModel {
        id: Set(c.id),
        name: Set(c.name.clone()),
        exchange: Set(c.exchange.clone()),
        ticker: Set(c.ticker.clone()),
        isin: Set(c.isin.clone()),
        website: Set(c.website.clone()),
    }
}

#[async_trait::async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        let res = company::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.map(Company::from))
    }

    async fn get_by_isin(&self, isin: &str) -> Result<Option<Company>, ServiceError> {
        let res = company::find_by_isin(&self.db, isin)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.map(Company::from))
    }

    async fn get_all(&self) -> Result<Vec<Company>, ServiceError> {
        let rows = company::Entity::find()
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Company::from).collect())
    }

    async fn add(&self, draft: &CompanyDraft) -> Result<Company, ServiceError> {
        let am = company::ActiveModel {
            id: NotSet,
            name: Set(draft.name.clone()),
            exchange: Set(draft.exchange.clone()),
            ticker: Set(draft.ticker.clone()),
            isin: Set(draft.isin.clone()),
            website: Set(draft.website.clone()),
        };
        let created = am.insert(&self.db).await.map_err(|e| map_write_err(e, &draft.isin))?;
        Ok(Company::from(created))
    }

    async fn update(&self, c: &Company) -> Result<(), ServiceError> {
        match active_model(c).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("company", c.id)),
            Err(e) => Err(map_write_err(e, &c.isin)),
        }
    }

    async fn delete(&self, c: &Company) -> Result<(), ServiceError> {
        let res = company::Entity::delete_by_id(c.id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("company", c.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn draft(isin: &str) -> CompanyDraft {
        CompanyDraft {
            id: None,
            name: "Intel Corporation".into(),
            exchange: "NASDAQ".into(),
            ticker: "INTC".into(),
            isin: isin.into(),
            website: None,
        }
    }

    #[tokio::test]
    async fn company_crud_against_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmCompanyRepository { db };

        let created = repo.add(&draft("US458140ZZ01")).await?;
        let mut found = repo.get_by_id(created.id).await?.expect("created row");
        assert_eq!(found, created);

        found.ticker = "INTC2".into();
        repo.update(&found).await?;
        let after = repo.get_by_isin("US458140ZZ01").await?.expect("updated row");
        assert_eq!(after.ticker, "INTC2");

        repo.delete(&after).await?;
        assert!(repo.get_by_id(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unique_index_backstop_maps_to_duplicate_key() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmCompanyRepository { db };

        let err = repo.add(&draft("US0378331005")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateKey(ref isin) if isin == "US0378331005"), "{err}");
        Ok(())
    }
}
