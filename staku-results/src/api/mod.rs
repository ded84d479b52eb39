//! HTTP API handlers

pub mod admin;
pub mod data;
pub mod health;
pub mod types;

pub use admin::{admin_routes, clear_results, upload_results};
pub use data::{data_routes, get_runner, list_runners, runner_facets, runners_by_category};
pub use health::health_routes;
