use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use models::{bike, customer};

use super::domain::{CustomerChanges, NewCustomer};
use crate::errors::RepoError;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, new: NewCustomer) -> Result<customer::Model, RepoError>;
    /// All customers, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<customer::Model>, RepoError>;
    async fn find(&self, id: Uuid) -> Result<Option<customer::Model>, RepoError>;
    /// `RepoError::NotFound` when `id` does not exist.
    async fn update(&self, id: Uuid, changes: CustomerChanges) -> Result<customer::Model, RepoError>;
    async fn count_bikes(&self, id: Uuid) -> Result<u64, RepoError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn create(&self, new: NewCustomer) -> Result<customer::Model, RepoError> {
        let am = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            created_at: Set(Utc::now().into()),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list_newest_first(&self) -> Result<Vec<customer::Model>, RepoError> {
        let rows = customer::Entity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<customer::Model>, RepoError> {
        Ok(customer::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: Uuid, changes: CustomerChanges) -> Result<customer::Model, RepoError> {
        let found = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound)?;
        if changes.is_empty() {
            return Ok(found);
        }
        let mut am: customer::ActiveModel = found.into();
        if let Some(name) = changes.name { am.name = Set(name); }
        if let Some(email) = changes.email { am.email = Set(email); }
        if let Some(phone) = changes.phone { am.phone = Set(phone); }
        Ok(am.update(&self.db).await?)
    }

    async fn count_bikes(&self, id: Uuid) -> Result<u64, RepoError> {
        let n = bike::Entity::find()
            .filter(bike::Column::CustomerId.eq(id))
            .count(&self.db)
            .await?;
        Ok(n)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
