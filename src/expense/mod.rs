//! Expense entries: money spent, filed under a category with optional tags.
//!
//! This module contains:
//! - The `Expense` model, the fixed list of categories and the database functions
//! - The form for adding an expense and its validation
//! - The route handlers for listing and adding expenses

mod core;
mod create_page;
mod form;
mod list_page;

pub use core::{
    EXPENSE_CATEGORIES, Expense, NewExpense, create_expense, create_expense_table,
    get_all_expenses,
};
pub use create_page::{add_expense_endpoint, get_add_expense_page};
pub use list_page::get_expenses_page;

#[cfg(test)]
pub use core::count_expenses;
