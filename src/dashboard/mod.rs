//! Dashboard module
//!
//! Provides an overview page with the income and expense totals, the balance,
//! the most recent transactions and the spending per category.

mod cards;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
