use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::bike::{domain::BikeInput, BikeService};
use service::customer::{domain::CustomerInput, CustomerService};
use service::mock::MemoryStore;
use service::service_record::{domain::ServiceRecordInput, ServiceRecordService};

fn bench_pending_or_overdue(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::default());
    let records = ServiceRecordService::with_default_threshold(store.clone());

    // seed outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let customer = CustomerService::new(store.clone())
            .create(CustomerInput {
                name: Some("Bench".into()),
                email: Some("bench@example.com".into()),
                phone: Some("555-0000".into()),
            })
            .await
            .unwrap();
        let bike = BikeService::new(store.clone())
            .create(BikeInput {
                brand: Some("Bench".into()),
                model: Some("Roadster".into()),
                year: Some(2020),
                customer_id: Some(customer.id.to_string()),
            })
            .await
            .unwrap();
        for day in 0..1_000 {
            let date = chrono::Utc::now() - chrono::Duration::days(day % 30);
            let status = ["pending", "in-progress", "done"][(day % 3) as usize];
            records
                .create(ServiceRecordInput {
                    bike_id: Some(bike.id.to_string()),
                    service_date: Some(date.to_rfc3339()),
                    description: Some("Benchmark service entry".into()),
                    status: Some(status.into()),
                })
                .await
                .unwrap();
        }
    });

    c.bench_function("service_records_pending_or_overdue", |b| {
        b.iter(|| {
            let _ = rt.block_on(records.pending_or_overdue()).unwrap();
        });
    });
}

criterion_group!(benches, bench_pending_or_overdue);
criterion_main!(benches);
