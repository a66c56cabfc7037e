//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use clinic_core::expense::{CreateExpenseInput, ExpenseCategory, ExpenseFilter};
use clinic_core::ledger::PaymentMethod;
use clinic_shared::types::{ClinicId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{day_range, page_request};
use crate::AppState;
use crate::error::billing_error_response;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/clinics/{clinic_id}/expenses",
        get(list_expenses).post(create_expense),
    )
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Category.
    pub category: ExpenseCategory,
    /// Amount spent.
    pub amount: Decimal,
    /// Who was paid.
    pub vendor: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// How it was paid.
    pub payment_method: PaymentMethod,
    /// Optional receipt link.
    pub receipt_url: Option<String>,
    /// Day the expense was incurred.
    pub date: NaiveDate,
    /// Staff user recording it.
    pub created_by: UserId,
}

/// Query parameters for listing expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    /// Restrict to one category.
    pub category: Option<ExpenseCategory>,
    /// First day included.
    pub date_from: Option<NaiveDate>,
    /// Last day included.
    pub date_to: Option<NaiveDate>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub page_size: Option<u32>,
}

/// POST `/clinics/{clinic_id}/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    let input = CreateExpenseInput {
        clinic_id,
        category: payload.category,
        amount: payload.amount,
        vendor: payload.vendor,
        description: payload.description,
        payment_method: payload.payment_method,
        receipt_url: payload.receipt_url,
        date: payload.date,
        created_by: payload.created_by,
    };

    match state.engine.expenses.create_expense(input).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

/// GET `/clinics/{clinic_id}/expenses` - List expenses by date, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Query(query): Query<ListExpensesQuery>,
) -> impl IntoResponse {
    let filter = ExpenseFilter {
        category: query.category,
        days: day_range(query.date_from, query.date_to),
    };

    match state
        .engine
        .expenses
        .list_expenses(clinic_id, filter, page_request(query.page, query.page_size))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => billing_error_response(e),
    }
}
