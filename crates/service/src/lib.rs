//! Business operations for the bike shop on top of the `models` entities.
//! - `customer`, `bike`, `service_record`: a repository trait, its SeaORM
//!   implementation and the service that validates input and enforces the
//!   referential rules.
//! - `errors`: repository failure kinds and the tagged `ServiceError` they translate into.
//! - `mock`: in-memory repositories for tests.

pub mod errors;
pub mod validate;
pub mod customer;
pub mod bike;
pub mod service_record;
pub mod mock;
#[cfg(test)]
pub mod test_support;
