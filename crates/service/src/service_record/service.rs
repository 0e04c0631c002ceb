use std::sync::Arc;

use chrono::Duration;
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument};
use uuid::Uuid;

use models::service_record::{self, validate_description, ServiceStatus};

use super::domain::{CompleteInput, NewServiceRecord, ServiceRecordInput, StatusInput};
use super::repository::ServiceRecordRepository;
use crate::errors::{RepoError, ServiceError};
use crate::validate::{now, parse_id, parse_instant, present};

pub const DEFAULT_OVERDUE_DAYS: i64 = 7;

/// Service record operations. Every status change funnels through [`ServiceRecordService::transition`],
/// which keeps `status` and `completion_date` consistent: a done record always has a completion
/// date, any other record never does.
pub struct ServiceRecordService {
    repo: Arc<dyn ServiceRecordRepository>,
    overdue_after: Duration,
}

impl ServiceRecordService {
    pub fn new(repo: Arc<dyn ServiceRecordRepository>, overdue_after: Duration) -> Self {
        Self { repo, overdue_after }
    }

    pub fn with_default_threshold(repo: Arc<dyn ServiceRecordRepository>) -> Self {
        Self::new(repo, Duration::days(DEFAULT_OVERDUE_DAYS))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ServiceRecordInput) -> Result<service_record::Model, ServiceError> {
        let (Some(bike_id), Some(service_date), Some(description), Some(status)) = (
            present(input.bike_id),
            present(input.service_date),
            input.description.filter(|d| !d.trim().is_empty()),
            present(input.status),
        ) else {
            return Err(ServiceError::validation(
                "Bike ID, service date, description, and status are required",
            ));
        };
        let service_date =
            parse_instant(&service_date).ok_or_else(|| ServiceError::validation("Invalid service date format"))?;
        let status: ServiceStatus = status.parse()?;
        validate_description(&description)?;
        let bike_id = parse_id(&bike_id)?;

        if !self.repo.bike_exists(bike_id).await? {
            return Err(ServiceError::not_found("Bike"));
        }
        let completion_date = status.is_finished().then(now);
        let created = self
            .repo
            .create(NewServiceRecord { bike_id, service_date, description, status, completion_date })
            .await
            .map_err(|e| match e {
                RepoError::ForeignKeyViolation => ServiceError::not_found("Bike"),
                other => other.into(),
            })?;
        info!(service_id = %created.id, bike_id = %bike_id, status = created.status.as_str(), "service_record_created");
        Ok(created)
    }

    /// Newest service date first.
    pub async fn list(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        Ok(self.repo.list_by_service_date_desc().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<service_record::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("Service"))
    }

    /// Moves a record to `status`. `done` stamps `completed_at` (or now); any other
    /// status clears the completion date and refuses an explicit `completed_at`.
    #[instrument(skip(self, completed_at), fields(service_id = %id))]
    pub async fn transition(
        &self,
        id: Uuid,
        status: ServiceStatus,
        completed_at: Option<DateTimeWithTimeZone>,
    ) -> Result<service_record::Model, ServiceError> {
        let completion_date = match (status.is_finished(), completed_at) {
            (true, at) => Some(at.unwrap_or_else(now)),
            (false, None) => None,
            (false, Some(_)) => {
                return Err(ServiceError::validation("Completion date is only allowed when status is done"));
            }
        };
        let updated = self
            .repo
            .set_status(id, status, completion_date)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => ServiceError::not_found("Service"),
                other => other.into(),
            })?;
        info!(service_id = %id, status = status.as_str(), "service_record_status_changed");
        Ok(updated)
    }

    pub async fn update_status(&self, id: Uuid, input: StatusInput) -> Result<service_record::Model, ServiceError> {
        let status = present(input.status).ok_or_else(|| ServiceError::validation("Service ID and status are required"))?;
        let status: ServiceStatus = status.parse()?;
        self.transition(id, status, None).await
    }

    pub async fn complete(&self, id: Uuid, input: CompleteInput) -> Result<service_record::Model, ServiceError> {
        let completed_at = match present(input.completion_date) {
            Some(raw) => Some(
                parse_instant(&raw).ok_or_else(|| ServiceError::validation("Invalid completion date format"))?,
            ),
            None => None,
        };
        self.transition(id, ServiceStatus::Done, completed_at).await
    }

    /// Unfinished records whose service date is strictly older than the overdue threshold, oldest first.
    pub async fn pending_or_overdue(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        let cutoff = self.overdue_cutoff(now());
        Ok(self.repo.list_unfinished_before(cutoff).await?)
    }

    pub fn overdue_cutoff(&self, now: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
        now - self.overdue_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bike::{domain::BikeInput, BikeService};
    use crate::customer::{domain::CustomerInput, CustomerService};
    use crate::mock::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        records: ServiceRecordService,
        bike_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::default());
        let customer = CustomerService::new(store.clone())
            .create(CustomerInput {
                name: Some("Grace".into()),
                email: Some("grace@example.com".into()),
                phone: Some("555-0600".into()),
            })
            .await
            .unwrap();
        let bike = BikeService::new(store.clone())
            .create(BikeInput {
                brand: Some("Cannondale".into()),
                model: Some("Topstone".into()),
                year: Some(2021),
                customer_id: Some(customer.id.to_string()),
            })
            .await
            .unwrap();
        Fixture {
            records: ServiceRecordService::with_default_threshold(store.clone()),
            store,
            bike_id: bike.id,
        }
    }

    fn input(bike_id: Uuid, service_date: &str, status: &str) -> ServiceRecordInput {
        ServiceRecordInput {
            bike_id: Some(bike_id.to_string()),
            service_date: Some(service_date.into()),
            description: Some("Brake pads and cable tune".into()),
            status: Some(status.into()),
        }
    }

    fn days_ago(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339()
    }

    #[tokio::test]
    async fn create_checks_fields_in_order() {
        let f = fixture().await;

        let missing = ServiceRecordInput { description: None, ..input(f.bike_id, "2024-05-01", "pending") };
        let err = f.records.create(missing).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m.ends_with("are required")));

        let bad_date = input(f.bike_id, "someday", "pending");
        let err = f.records.create(bad_date).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid service date format"));

        let bad_status = input(f.bike_id, "2024-05-01", "finished");
        let err = f.records.create(bad_status).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m.contains("'finished'")));

        // statuses are case sensitive
        let shouted = input(f.bike_id, "2024-05-01", "DONE");
        assert!(matches!(f.records.create(shouted).await.unwrap_err(), ServiceError::Validation(_)));

        let unknown_bike = input(Uuid::new_v4(), "2024-05-01", "pending");
        let err = f.records.create(unknown_bike).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Bike not found"));
        assert!(f.records.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn description_length_bounds() {
        let f = fixture().await;
        for (len, ok) in [(9, false), (10, true), (500, true), (501, false)] {
            let rec = ServiceRecordInput { description: Some("x".repeat(len)), ..input(f.bike_id, "2024-05-01", "pending") };
            assert_eq!(f.records.create(rec).await.is_ok(), ok, "length {len}");
        }
    }

    #[tokio::test]
    async fn description_is_checked_and_stored_as_sent() {
        let f = fixture().await;
        let padded = ServiceRecordInput { description: Some(" Fix brake".into()), ..input(f.bike_id, "2024-05-01", "pending") };
        let rec = f.records.create(padded).await.unwrap();
        assert_eq!(rec.description, " Fix brake");

        let trailing = ServiceRecordInput {
            description: Some("Chain lube and tune  ".into()),
            ..input(f.bike_id, "2024-05-01", "pending")
        };
        let rec = f.records.create(trailing).await.unwrap();
        assert_eq!(f.records.get(rec.id).await.unwrap().description, "Chain lube and tune  ");

        let blank = ServiceRecordInput { description: Some("            ".into()), ..input(f.bike_id, "2024-05-01", "pending") };
        let err = f.records.create(blank).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m.ends_with("are required")));
    }

    #[tokio::test]
    async fn list_is_newest_service_date_first() {
        let f = fixture().await;
        for date in ["2024-01-10", "2024-03-10", "2024-02-10"] {
            f.records.create(input(f.bike_id, date, "pending")).await.unwrap();
        }
        let dates: Vec<String> = f
            .records
            .list()
            .await
            .unwrap()
            .iter()
            .map(|r| r.service_date.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, ["2024-03-10", "2024-02-10", "2024-01-10"]);
    }

    #[tokio::test]
    async fn overdue_report_excludes_recent_and_done() {
        let f = fixture().await;
        let older = f.records.create(input(f.bike_id, &days_ago(20), "in-progress")).await.unwrap();
        let old = f.records.create(input(f.bike_id, &days_ago(8), "pending")).await.unwrap();
        f.records.create(input(f.bike_id, &days_ago(6), "pending")).await.unwrap();
        f.records.create(input(f.bike_id, &days_ago(30), "done")).await.unwrap();

        let ids: Vec<Uuid> = f.records.pending_or_overdue().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![older.id, old.id]);
    }

    #[tokio::test]
    async fn overdue_threshold_is_configurable() {
        let f = fixture().await;
        let recent = f.records.create(input(f.bike_id, &days_ago(2), "pending")).await.unwrap();
        let strict = ServiceRecordService::new(f.store.clone(), Duration::days(1));
        let ids: Vec<Uuid> = strict.pending_or_overdue().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![recent.id]);

        let at = now();
        assert_eq!(strict.overdue_cutoff(at), at - Duration::days(1));
    }

    #[tokio::test]
    async fn complete_without_date_stamps_now() {
        let f = fixture().await;
        let rec = f.records.create(input(f.bike_id, "2024-05-01", "in-progress")).await.unwrap();
        let before = now();
        let done = f.records.complete(rec.id, CompleteInput::default()).await.unwrap();
        let after = now();
        assert_eq!(done.status, ServiceStatus::Done);
        let stamped = done.completion_date.unwrap();
        assert!(stamped >= before && stamped <= after);
    }

    #[tokio::test]
    async fn complete_with_explicit_and_invalid_dates() {
        let f = fixture().await;
        let rec = f.records.create(input(f.bike_id, "2024-05-01", "pending")).await.unwrap();

        let err = f
            .records
            .complete(rec.id, CompleteInput { completion_date: Some("not-a-date".into()) })
            .await
            .unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid completion date format"));
        assert_eq!(f.records.get(rec.id).await.unwrap().status, ServiceStatus::Pending);

        let done = f
            .records
            .complete(rec.id, CompleteInput { completion_date: Some("2024-05-03T16:30:00Z".into()) })
            .await
            .unwrap();
        assert_eq!(done.completion_date, parse_instant("2024-05-03T16:30:00Z"));
    }

    #[tokio::test]
    async fn moving_back_to_pending_clears_completion() {
        let f = fixture().await;
        let rec = f.records.create(input(f.bike_id, "2024-05-01", "pending")).await.unwrap();

        let done = f.records.update_status(rec.id, StatusInput { status: Some("done".into()) }).await.unwrap();
        assert!(done.completion_date.is_some());

        let reopened = f.records.update_status(rec.id, StatusInput { status: Some("pending".into()) }).await.unwrap();
        assert_eq!(reopened.status, ServiceStatus::Pending);
        assert_eq!(reopened.completion_date, None);
    }

    #[tokio::test]
    async fn transition_rejects_completion_date_for_unfinished_status() {
        let f = fixture().await;
        let rec = f.records.create(input(f.bike_id, "2024-05-01", "pending")).await.unwrap();
        let err = f.records.transition(rec.id, ServiceStatus::InProgress, Some(now())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn status_changes_on_unknown_record_are_not_found() {
        let f = fixture().await;
        let err = f
            .records
            .update_status(Uuid::new_v4(), StatusInput { status: Some("in-progress".into()) })
            .await
            .unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Service not found"));

        let err = f.records.update_status(Uuid::new_v4(), StatusInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = f.records.complete(Uuid::new_v4(), CompleteInput::default()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn created_done_record_carries_completion_date() {
        let f = fixture().await;
        let rec = f.records.create(input(f.bike_id, "2024-05-01", "done")).await.unwrap();
        assert!(rec.completion_date.is_some());
    }
}
