//! Create `service_record` table with FK to `bike`.
//! Status is stored as its lowercase-hyphenated literal.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRecord::Table)
                    .if_not_exists()
                    .col(uuid(ServiceRecord::Id).primary_key())
                    .col(uuid(ServiceRecord::BikeId).not_null())
                    .col(timestamp_with_time_zone(ServiceRecord::ServiceDate).not_null())
                    .col(string_len(ServiceRecord::Description, 500).not_null())
                    .col(string_len(ServiceRecord::Status, 16).not_null())
                    .col(
                        ColumnDef::new(ServiceRecord::CompletionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .check(
                        Expr::col(ServiceRecord::Status).is_in(["pending", "in-progress", "done"]),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_bike")
                            .from(ServiceRecord::Table, ServiceRecord::BikeId)
                            .to(Bike::Table, Bike::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRecord {
    Table,
    Id,
    BikeId,
    ServiceDate,
    Description,
    Status,
    CompletionDate,
}

#[derive(DeriveIden)]
enum Bike { Table, Id }
