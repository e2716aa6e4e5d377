use std::sync::Arc;

use cambio_core::db::{self, DbPool};
use chrono::Local;

pub fn get_test_db_path(test_id: &str) -> String {
    let now = Local::now();
    now.format(&format!("./tests/output/%Y%m%d/%H%M%S-{}/app.db", test_id))
        .to_string()
}

pub fn get_migrated_pool(db_path: &str) -> Arc<DbPool> {
    let db_path = db::init(db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    pool
}
