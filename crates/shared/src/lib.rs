//! Shared types, errors, and configuration for the clinic billing engine.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The pagination contract shared by every list operation
//! - Calendar-day ranges and year-month periods
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
