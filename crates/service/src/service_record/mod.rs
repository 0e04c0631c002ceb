//! Service records: creation against an existing bike, the status state machine
//! and the pending/overdue report.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::{ServiceRecordService, DEFAULT_OVERDUE_DAYS};
