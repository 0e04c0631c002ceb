//! Create `bike` table with FK to `customer`.
//!
//! Deleting a customer that still owns bikes is rejected by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bike::Table)
                    .if_not_exists()
                    .col(uuid(Bike::Id).primary_key())
                    .col(string_len(Bike::Brand, 128).not_null())
                    .col(string_len(Bike::Model, 128).not_null())
                    .col(integer(Bike::Year).not_null())
                    .col(uuid(Bike::CustomerId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bike_customer")
                            .from(Bike::Table, Bike::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bike::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bike { Table, Id, Brand, Model, Year, CustomerId }

#[derive(DeriveIden)]
enum Customer { Table, Id }
