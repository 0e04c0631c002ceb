pub mod errors;
pub mod db;
pub mod customer;
pub mod bike;
pub mod service_record;

#[cfg(test)]
mod tests;
