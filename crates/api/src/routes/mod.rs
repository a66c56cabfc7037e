//! API route definitions.

use axum::Router;
use chrono::NaiveDate;
use clinic_shared::types::{DayRange, PageRequest};

use crate::AppState;

pub mod balances;
pub mod cashier;
pub mod expenses;
pub mod health;
pub mod payments;
pub mod refunds;
pub mod reports;
pub mod settings;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(payments::routes())
        .merge(refunds::routes())
        .merge(expenses::routes())
        .merge(cashier::routes())
        .merge(balances::routes())
        .merge(reports::routes())
        .merge(settings::routes())
}

/// Page parameters from the query string; missing values use the defaults.
pub(crate) fn page_request(page: Option<u32>, page_size: Option<u32>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest::new(
        page.unwrap_or(defaults.page),
        page_size.unwrap_or(defaults.page_size),
    )
}

/// Inclusive `date_from` / `date_to` query bounds.
pub(crate) fn day_range(date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> DayRange {
    DayRange::new(date_from, date_to)
}
