//! Common types used across the application.

pub mod day;
pub mod id;
pub mod pagination;

pub use day::{DayKey, DayRange, YearMonth, YearMonthParseError};
pub use id::*;
pub use pagination::{PageRequest, PageResponse, paginate};
