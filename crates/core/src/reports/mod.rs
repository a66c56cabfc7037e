//! Monthly financial summary.

pub mod calculator;
pub mod service;
pub mod types;


pub use calculator::MonthlySummaryCalculator;
pub use service::ReportService;
pub use types::MonthlySummary;
