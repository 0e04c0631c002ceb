/// Status conversion and field validation tests (no database needed)
pub mod validation_tests;


/// Database tests run only when a database is configured and `SKIP_DB_TESTS` is unset.
pub fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}
