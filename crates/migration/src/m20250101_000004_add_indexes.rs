use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Customer listing is newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_created_at")
                    .table(Customer::Table)
                    .col(Customer::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Bike: index on customer_id (ownership checks before delete)
        manager
            .create_index(
                Index::create()
                    .name("idx_bike_customer")
                    .table(Bike::Table)
                    .col(Bike::CustomerId)
                    .to_owned(),
            )
            .await?;

        // ServiceRecord: index on bike_id
        manager
            .create_index(
                Index::create()
                    .name("idx_service_record_bike")
                    .table(ServiceRecord::Table)
                    .col(ServiceRecord::BikeId)
                    .to_owned(),
            )
            .await?;

        // ServiceRecord: composite (status, service_date) for the overdue query
        manager
            .create_index(
                Index::create()
                    .name("idx_service_record_status_date")
                    .table(ServiceRecord::Table)
                    .col(ServiceRecord::Status)
                    .col(ServiceRecord::ServiceDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_created_at").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bike_customer").table(Bike::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_record_bike").table(ServiceRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_record_status_date").table(ServiceRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, CreatedAt }

#[derive(DeriveIden)]
enum Bike { Table, CustomerId }

#[derive(DeriveIden)]
enum ServiceRecord { Table, BikeId, Status, ServiceDate }
