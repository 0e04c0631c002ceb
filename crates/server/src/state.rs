use std::sync::Arc;

use chrono::Duration;
use configs::ServiceSettings;
use sea_orm::DatabaseConnection;
use service::bike::{repository::SeaOrmBikeRepository, BikeService};
use service::customer::{repository::SeaOrmCustomerRepository, CustomerService};
use service::mock::MemoryStore;
use service::service_record::{repository::SeaOrmServiceRecordRepository, ServiceRecordService};

/// Shared handler state. Services are immutable and cheap to clone through `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<CustomerService>,
    pub bikes: Arc<BikeService>,
    pub services: Arc<ServiceRecordService>,
}

impl ServerState {
    pub fn from_db(db: DatabaseConnection, settings: &ServiceSettings) -> Self {
        let overdue_after = Duration::days(settings.overdue_after_days);
        Self {
            customers: Arc::new(CustomerService::new(Arc::new(SeaOrmCustomerRepository { db: db.clone() }))),
            bikes: Arc::new(BikeService::new(Arc::new(SeaOrmBikeRepository { db: db.clone() }))),
            services: Arc::new(ServiceRecordService::new(Arc::new(SeaOrmServiceRecordRepository { db }), overdue_after)),
        }
    }

    /// State backed by one in-memory store, for tests and local experiments.
    pub fn in_memory(store: Arc<MemoryStore>, overdue_after: Duration) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(store.clone())),
            bikes: Arc::new(BikeService::new(store.clone())),
            services: Arc::new(ServiceRecordService::new(store, overdue_after)),
        }
    }
}
