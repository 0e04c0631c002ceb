//! Bike slice: creation against an existing owner, lookups, guarded delete.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::BikeService;
