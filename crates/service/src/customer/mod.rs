//! Customer slice: domain inputs, repository abstraction, and service rules.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CustomerService;
