//! Income entries: money received, labelled with where it came from.
//!
//! This module contains:
//! - The `Income` model and the database functions for storing and listing it
//! - The form for adding income and its validation
//! - The route handlers for listing and adding income

mod core;
mod create_page;
mod form;
mod list_page;

pub use core::{Income, NewIncome, create_income, create_income_table, get_all_income};
pub use create_page::{add_income_endpoint, get_add_income_page};
pub use list_page::get_income_page;

#[cfg(test)]
pub use core::count_income;
