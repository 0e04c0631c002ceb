use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use models::bike;
use models::service_record::{self, ServiceStatus};

use super::domain::NewServiceRecord;
use crate::errors::RepoError;

#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    async fn bike_exists(&self, bike_id: Uuid) -> Result<bool, RepoError>;
    async fn create(&self, new: NewServiceRecord) -> Result<service_record::Model, RepoError>;
    async fn list_by_service_date_desc(&self) -> Result<Vec<service_record::Model>, RepoError>;
    async fn find(&self, id: Uuid) -> Result<Option<service_record::Model>, RepoError>;
    /// Writes status and completion date together. `RepoError::NotFound` when `id` does not exist.
    async fn set_status(
        &self,
        id: Uuid,
        status: ServiceStatus,
        completion_date: Option<DateTimeWithTimeZone>,
    ) -> Result<service_record::Model, RepoError>;
    /// Pending and in-progress records with a service date strictly before `cutoff`, oldest first.
    async fn list_unfinished_before(
        &self,
        cutoff: DateTimeWithTimeZone,
    ) -> Result<Vec<service_record::Model>, RepoError>;
}

pub struct SeaOrmServiceRecordRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ServiceRecordRepository for SeaOrmServiceRecordRepository {
    async fn bike_exists(&self, bike_id: Uuid) -> Result<bool, RepoError> {
        Ok(bike::Entity::find_by_id(bike_id).count(&self.db).await? > 0)
    }

    async fn create(&self, new: NewServiceRecord) -> Result<service_record::Model, RepoError> {
        let am = service_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            bike_id: Set(new.bike_id),
            service_date: Set(new.service_date),
            description: Set(new.description),
            status: Set(new.status),
            completion_date: Set(new.completion_date),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list_by_service_date_desc(&self) -> Result<Vec<service_record::Model>, RepoError> {
        let rows = service_record::Entity::find()
            .order_by_desc(service_record::Column::ServiceDate)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<service_record::Model>, RepoError> {
        Ok(service_record::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ServiceStatus,
        completion_date: Option<DateTimeWithTimeZone>,
    ) -> Result<service_record::Model, RepoError> {
        let found = service_record::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound)?;
        let mut am: service_record::ActiveModel = found.into();
        am.status = Set(status);
        am.completion_date = Set(completion_date);
        Ok(am.update(&self.db).await?)
    }

    async fn list_unfinished_before(
        &self,
        cutoff: DateTimeWithTimeZone,
    ) -> Result<Vec<service_record::Model>, RepoError> {
        let rows = service_record::Entity::find()
            .filter(service_record::Column::Status.is_in([ServiceStatus::Pending, ServiceStatus::InProgress]))
            .filter(service_record::Column::ServiceDate.lt(cutoff))
            .order_by_asc(service_record::Column::ServiceDate)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
