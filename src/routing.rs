//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{add_expense_endpoint, get_add_expense_page, get_expenses_page},
    income::{add_income_endpoint, get_add_income_page, get_income_page},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    statistics::{get_statistics_page, set_budget_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::INCOME_VIEW, get(get_income_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(
            endpoints::ADD_INCOME,
            get(get_add_income_page).post(add_income_endpoint),
        )
        .route(
            endpoints::ADD_EXPENSE,
            get(get_add_expense_page).post(add_expense_endpoint),
        )
        .route(endpoints::STATISTICS_VIEW, get(get_statistics_page))
        .route(endpoints::BUDGETS, post(set_budget_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
