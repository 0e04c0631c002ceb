use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use models::{bike, customer, service_record};

use super::domain::NewBike;
use crate::errors::RepoError;

#[async_trait]
pub trait BikeRepository: Send + Sync {
    async fn customer_exists(&self, customer_id: Uuid) -> Result<bool, RepoError>;
    async fn create(&self, new: NewBike) -> Result<bike::Model, RepoError>;
    async fn list(&self) -> Result<Vec<bike::Model>, RepoError>;
    async fn find(&self, id: Uuid) -> Result<Option<bike::Model>, RepoError>;
    async fn count_service_records(&self, id: Uuid) -> Result<u64, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmBikeRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl BikeRepository for SeaOrmBikeRepository {
    async fn customer_exists(&self, customer_id: Uuid) -> Result<bool, RepoError> {
        let n = customer::Entity::find_by_id(customer_id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn create(&self, new: NewBike) -> Result<bike::Model, RepoError> {
        let am = bike::ActiveModel {
            id: Set(Uuid::new_v4()),
            brand: Set(new.brand),
            model_name: Set(new.model),
            year: Set(new.year),
            customer_id: Set(new.customer_id),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list(&self) -> Result<Vec<bike::Model>, RepoError> {
        Ok(bike::Entity::find().all(&self.db).await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<bike::Model>, RepoError> {
        Ok(bike::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn count_service_records(&self, id: Uuid) -> Result<u64, RepoError> {
        let n = service_record::Entity::find()
            .filter(service_record::Column::BikeId.eq(id))
            .count(&self.db)
            .await?;
        Ok(n)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = bike::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::domain::NewCustomer;
    use crate::customer::repository::{CustomerRepository, SeaOrmCustomerRepository};
    use crate::test_support::{db_tests_enabled, get_db};

    #[tokio::test]
    async fn seaorm_unknown_owner_is_foreign_key_violation() -> Result<(), anyhow::Error> {
        if !db_tests_enabled() { return Ok(()); }
        let repo = SeaOrmBikeRepository { db: get_db().await? };

        let orphan = NewBike { brand: "Giant".into(), model: "TCR".into(), year: 2020, customer_id: Uuid::new_v4() };
        assert!(!repo.customer_exists(orphan.customer_id).await?);
        assert_eq!(repo.create(orphan).await.unwrap_err(), RepoError::ForeignKeyViolation);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_bike_lifecycle() -> Result<(), anyhow::Error> {
        if !db_tests_enabled() { return Ok(()); }
        let db = get_db().await?;
        let customers = SeaOrmCustomerRepository { db: db.clone() };
        let repo = SeaOrmBikeRepository { db };

        let owner = customers
            .create(NewCustomer {
                name: "Bike Owner".into(),
                email: format!("bike_{}@example.com", Uuid::new_v4()),
                phone: "555-0300".into(),
            })
            .await?;
        let b = repo
            .create(NewBike { brand: "Giant".into(), model: "TCR".into(), year: 2020, customer_id: owner.id })
            .await?;
        assert_eq!(repo.find(b.id).await?.map(|m| m.model_name), Some("TCR".to_string()));
        assert_eq!(repo.count_service_records(b.id).await?, 0);
        assert_eq!(customers.count_bikes(owner.id).await?, 1);

        // restrict: owner cannot go while the bike exists
        assert_eq!(customers.delete(owner.id).await.unwrap_err(), RepoError::ForeignKeyViolation);

        assert!(repo.delete(b.id).await?);
        assert!(customers.delete(owner.id).await?);
        Ok(())
    }
}
