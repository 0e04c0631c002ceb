//! In-memory repository used by unit and router tests. It enforces the same
//! constraints the schema does: unique customer email and restrict-on-delete
//! foreign keys.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use models::service_record::ServiceStatus;
use models::{bike, customer, service_record};

use crate::bike::domain::NewBike;
use crate::bike::repository::BikeRepository;
use crate::customer::domain::{CustomerChanges, NewCustomer};
use crate::customer::repository::CustomerRepository;
use crate::errors::RepoError;
use crate::service_record::domain::NewServiceRecord;
use crate::service_record::repository::ServiceRecordRepository;

#[derive(Default)]
struct Tables {
    customers: Vec<customer::Model>,
    bikes: Vec<bike::Model>,
    records: Vec<service_record::Model>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.customers.iter().any(|c| c.email == email && Some(c.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn email_conflict() -> RepoError {
    RepoError::UniqueViolation { field: "email".into() }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create(&self, new: NewCustomer) -> Result<customer::Model, RepoError> {
        let mut t = self.lock();
        if t.email_taken(&new.email, None) {
            return Err(email_conflict());
        }
        let model = customer::Model {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            created_at: Utc::now().fixed_offset(),
        };
        t.customers.push(model.clone());
        Ok(model)
    }

    async fn list_newest_first(&self) -> Result<Vec<customer::Model>, RepoError> {
        // reverse insertion order so equal timestamps still list the latest insert first
        let mut rows: Vec<_> = self.lock().customers.iter().rev().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<customer::Model>, RepoError> {
        Ok(self.lock().customers.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: CustomerChanges) -> Result<customer::Model, RepoError> {
        let mut t = self.lock();
        if let Some(email) = &changes.email {
            if t.email_taken(email, Some(id)) {
                return Err(email_conflict());
            }
        }
        let row = t.customers.iter_mut().find(|c| c.id == id).ok_or(RepoError::NotFound)?;
        if let Some(name) = changes.name { row.name = name; }
        if let Some(email) = changes.email { row.email = email; }
        if let Some(phone) = changes.phone { row.phone = phone; }
        Ok(row.clone())
    }

    async fn count_bikes(&self, id: Uuid) -> Result<u64, RepoError> {
        Ok(self.lock().bikes.iter().filter(|b| b.customer_id == id).count() as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut t = self.lock();
        if t.bikes.iter().any(|b| b.customer_id == id) {
            return Err(RepoError::ForeignKeyViolation);
        }
        let before = t.customers.len();
        t.customers.retain(|c| c.id != id);
        Ok(t.customers.len() < before)
    }
}

#[async_trait]
impl BikeRepository for MemoryStore {
    async fn customer_exists(&self, customer_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.lock().customers.iter().any(|c| c.id == customer_id))
    }

    async fn create(&self, new: NewBike) -> Result<bike::Model, RepoError> {
        let mut t = self.lock();
        if !t.customers.iter().any(|c| c.id == new.customer_id) {
            return Err(RepoError::ForeignKeyViolation);
        }
        let model = bike::Model {
            id: Uuid::new_v4(),
            brand: new.brand,
            model_name: new.model,
            year: new.year,
            customer_id: new.customer_id,
        };
        t.bikes.push(model.clone());
        Ok(model)
    }

    async fn list(&self) -> Result<Vec<bike::Model>, RepoError> {
        Ok(self.lock().bikes.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<bike::Model>, RepoError> {
        Ok(self.lock().bikes.iter().find(|b| b.id == id).cloned())
    }

    async fn count_service_records(&self, id: Uuid) -> Result<u64, RepoError> {
        Ok(self.lock().records.iter().filter(|r| r.bike_id == id).count() as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut t = self.lock();
        if t.records.iter().any(|r| r.bike_id == id) {
            return Err(RepoError::ForeignKeyViolation);
        }
        let before = t.bikes.len();
        t.bikes.retain(|b| b.id != id);
        Ok(t.bikes.len() < before)
    }
}

#[async_trait]
impl ServiceRecordRepository for MemoryStore {
    async fn bike_exists(&self, bike_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.lock().bikes.iter().any(|b| b.id == bike_id))
    }

    async fn create(&self, new: NewServiceRecord) -> Result<service_record::Model, RepoError> {
        let mut t = self.lock();
        if !t.bikes.iter().any(|b| b.id == new.bike_id) {
            return Err(RepoError::ForeignKeyViolation);
        }
        let model = service_record::Model {
            id: Uuid::new_v4(),
            bike_id: new.bike_id,
            service_date: new.service_date,
            description: new.description,
            status: new.status,
            completion_date: new.completion_date,
        };
        t.records.push(model.clone());
        Ok(model)
    }

    async fn list_by_service_date_desc(&self) -> Result<Vec<service_record::Model>, RepoError> {
        let mut rows = self.lock().records.clone();
        rows.sort_by(|a, b| b.service_date.cmp(&a.service_date));
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<service_record::Model>, RepoError> {
        Ok(self.lock().records.iter().find(|r| r.id == id).cloned())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ServiceStatus,
        completion_date: Option<DateTimeWithTimeZone>,
    ) -> Result<service_record::Model, RepoError> {
        let mut t = self.lock();
        let row = t.records.iter_mut().find(|r| r.id == id).ok_or(RepoError::NotFound)?;
        row.status = status;
        row.completion_date = completion_date;
        Ok(row.clone())
    }

    async fn list_unfinished_before(
        &self,
        cutoff: DateTimeWithTimeZone,
    ) -> Result<Vec<service_record::Model>, RepoError> {
        let mut rows: Vec<_> = self
            .lock()
            .records
            .iter()
            .filter(|r| !r.status.is_finished() && r.service_date < cutoff)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.service_date.cmp(&b.service_date));
        Ok(rows)
    }
}
