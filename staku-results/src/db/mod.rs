//! Database access layer for staku-results
//!
//! Every function takes the pool explicitly; the pool is created once in
//! `main` and carried in `AppState`.

mod runners;

pub use runners::{
    bulk_insert, bulk_insert_atomic, clear_all, count_all, get_by_id, list_all,
    list_by_category, BulkInsertError,
};
