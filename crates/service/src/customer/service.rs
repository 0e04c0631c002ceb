use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::customer;

use super::domain::{CustomerChanges, CustomerInput, NewCustomer};
use super::repository::CustomerRepository;
use crate::errors::{RepoError, ServiceError};
use crate::validate::present;

/// Customer business rules: required fields on create, partial update,
/// and no delete while the customer still owns bikes.
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CustomerInput) -> Result<customer::Model, ServiceError> {
        let (Some(name), Some(email), Some(phone)) = (present(input.name), present(input.email), present(input.phone)) else {
            return Err(ServiceError::validation("Name, email, and phone are required"));
        };
        let created = self.repo.create(NewCustomer { name, email, phone }).await?;
        info!(customer_id = %created.id, "customer_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<customer::Model>, ServiceError> {
        Ok(self.repo.list_newest_first().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<customer::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("Customer"))
    }

    /// Applies only the fields that are present and non-blank.
    #[instrument(skip(self, input), fields(customer_id = %id))]
    pub async fn update(&self, id: Uuid, input: CustomerInput) -> Result<customer::Model, ServiceError> {
        let changes = CustomerChanges::from(input);
        let updated = self.repo.update(id, changes).await.map_err(|e| match e {
            RepoError::NotFound => ServiceError::not_found("Customer"),
            other => other.into(),
        })?;
        info!(customer_id = %updated.id, "customer_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.find(id).await?.is_none() {
            return Err(ServiceError::not_found("Customer"));
        }
        if self.repo.count_bikes(id).await? > 0 {
            return Err(owns_bikes());
        }
        // a bike added after the count is caught by the foreign key
        let removed = self.repo.delete(id).await.map_err(|e| match e {
            RepoError::ForeignKeyViolation => owns_bikes(),
            other => other.into(),
        })?;
        if !removed {
            return Err(ServiceError::not_found("Customer"));
        }
        info!(customer_id = %id, "customer_deleted");
        Ok(())
    }
}

fn owns_bikes() -> ServiceError {
    ServiceError::Conflict("Cannot delete customer with associated bikes".into())
}
