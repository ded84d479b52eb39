//! # Staku Common Library
//!
//! Shared code for the race results service:
//! - Participant row models
//! - Database initialization and schema
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
