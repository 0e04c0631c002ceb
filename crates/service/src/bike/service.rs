use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::bike;

use super::domain::{BikeInput, NewBike};
use super::repository::BikeRepository;
use crate::errors::{RepoError, ServiceError};
use crate::validate::{parse_id, present};

pub struct BikeService {
    repo: Arc<dyn BikeRepository>,
}

impl BikeService {
    pub fn new(repo: Arc<dyn BikeRepository>) -> Self { Self { repo } }

    /// Creates a bike for an existing customer. An unknown owner is `NotFound` and no row is written.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: BikeInput) -> Result<bike::Model, ServiceError> {
        let (Some(brand), Some(model), Some(year), Some(customer_id)) =
            (present(input.brand), present(input.model), input.year, present(input.customer_id))
        else {
            return Err(ServiceError::validation("Brand, model, year, and customerId are required"));
        };
        bike::validate_year(year)?;
        let customer_id = parse_id(&customer_id)?;

        if !self.repo.customer_exists(customer_id).await? {
            return Err(ServiceError::not_found("Customer"));
        }
        // the owner may disappear between the check and the insert
        let created = self
            .repo
            .create(NewBike { brand, model, year, customer_id })
            .await
            .map_err(|e| match e {
                RepoError::ForeignKeyViolation => ServiceError::not_found("Customer"),
                other => other.into(),
            })?;
        info!(bike_id = %created.id, customer_id = %customer_id, "bike_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<bike::Model>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<bike::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("Bike"))
    }

    #[instrument(skip(self), fields(bike_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.find(id).await?.is_none() {
            return Err(ServiceError::not_found("Bike"));
        }
        if self.repo.count_service_records(id).await? > 0 {
            return Err(has_records());
        }
        let removed = self.repo.delete(id).await.map_err(|e| match e {
            RepoError::ForeignKeyViolation => has_records(),
            other => other.into(),
        })?;
        if !removed {
            return Err(ServiceError::not_found("Bike"));
        }
        info!(bike_id = %id, "bike_deleted");
        Ok(())
    }
}

fn has_records() -> ServiceError {
    ServiceError::Conflict("Cannot delete bike with associated service records".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{domain::CustomerInput, CustomerService};
    use crate::mock::MemoryStore;
    use crate::service_record::{domain::ServiceRecordInput, ServiceRecordService};

    struct Fixture {
        customers: CustomerService,
        bikes: BikeService,
        records: ServiceRecordService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::default());
        Fixture {
            customers: CustomerService::new(store.clone()),
            bikes: BikeService::new(store.clone()),
            records: ServiceRecordService::with_default_threshold(store),
        }
    }

    fn bike_input(customer_id: &str) -> BikeInput {
        BikeInput {
            brand: Some("Specialized".into()),
            model: Some("Allez".into()),
            year: Some(2019),
            customer_id: Some(customer_id.into()),
        }
    }

    async fn owner(f: &Fixture) -> Uuid {
        f.customers
            .create(CustomerInput {
                name: Some("Owner".into()),
                email: Some(format!("{}@example.com", Uuid::new_v4())),
                phone: Some("555-0400".into()),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found_and_nothing_is_stored() {
        let f = fixture();
        let err = f.bikes.create(bike_input(&Uuid::new_v4().to_string())).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Customer not found"));
        assert_eq!(err.status_code(), 404);
        assert!(f.bikes.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let f = fixture();
        let id = owner(&f).await.to_string();

        let no_year = BikeInput { year: None, ..bike_input(&id) };
        assert!(matches!(f.bikes.create(no_year).await.unwrap_err(), ServiceError::Validation(_)));

        let bad_owner = bike_input("bike-owner-42");
        let err = f.bikes.create(bad_owner).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid ID format"));

        let zero_year = BikeInput { year: Some(0), ..bike_input(&id) };
        assert!(matches!(f.bikes.create(zero_year).await.unwrap_err(), ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_get_and_list() {
        let f = fixture();
        let id = owner(&f).await;
        let b = f.bikes.create(bike_input(&id.to_string())).await.unwrap();
        assert_eq!(b.customer_id, id);
        assert_eq!(b.model_name, "Allez");
        assert_eq!(f.bikes.get(b.id).await.unwrap(), b);
        assert_eq!(f.bikes.list().await.unwrap(), vec![b]);
        assert!(matches!(f.bikes.get(Uuid::new_v4()).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_blocked_by_service_records() {
        let f = fixture();
        let id = owner(&f).await;
        let b = f.bikes.create(bike_input(&id.to_string())).await.unwrap();
        let idle = f.bikes.create(bike_input(&id.to_string())).await.unwrap();
        f.records
            .create(ServiceRecordInput {
                bike_id: Some(b.id.to_string()),
                service_date: Some("2024-05-01".into()),
                description: Some("Full drivetrain clean".into()),
                status: Some("pending".into()),
            })
            .await
            .unwrap();

        let err = f.bikes.delete(b.id).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Conflict(m) if m.contains("service records")));
        assert!(f.bikes.get(b.id).await.is_ok());

        f.bikes.delete(idle.id).await.unwrap();
        assert!(matches!(f.bikes.get(idle.id).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(matches!(f.bikes.delete(idle.id).await.unwrap_err(), ServiceError::NotFound(_)));
    }
}
