//! Read-only queries that summarise income and expenses.
//!
//! Nothing here is cached, every page load runs the queries again.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ValueRef},
};
use time::{Date, PrimitiveDateTime};

use crate::{Amount, Error};

/// The number of entries shown in the recent transactions table.
pub const RECENT_TRANSACTION_LIMIT: u32 = 5;

/// Whether a transaction is income or an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind {other:?}").into(),
            )),
        }
    }
}

/// An income or expense entry in the recent transactions table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentTransaction {
    pub kind: TransactionKind,
    pub id: i64,
    pub amount: Amount,
    pub date: Date,
    pub description: String,
    /// The source for income and the category for expenses.
    pub extra: String,
    pub created_at: PrimitiveDateTime,
}

/// The total spent in one expense category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

/// The number of expenses and the total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStatistics {
    pub category: String,
    pub count: u32,
    pub total: Amount,
}

/// The total spent in one month, with the budget for that month if one is set.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    /// From 1 (January) to 12 (December).
    pub month: u8,
    pub total: Amount,
    pub budget: Option<Amount>,
}

impl MonthlyTotal {
    /// How much of the budget is left, negative if it was exceeded.
    pub fn remaining_budget(&self) -> Option<Amount> {
        self.budget.map(|budget| budget - self.total)
    }
}

/// The sum of all income, zero if there is none.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn total_income(connection: &Connection) -> Result<Amount, Error> {
    connection
        .query_row("SELECT COALESCE(SUM(amount), 0) FROM income", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// The sum of all expenses, zero if there are none.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn total_expenses(connection: &Connection) -> Result<Amount, Error> {
    connection
        .query_row("SELECT COALESCE(SUM(amount), 0) FROM expense", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Total income minus total expenses. May be negative.
///
/// # Errors
/// Returns [Error::SqlError] if either total cannot be queried.
pub fn balance(connection: &Connection) -> Result<Amount, Error> {
    Ok(total_income(connection)? - total_expenses(connection)?)
}

/// The latest [RECENT_TRANSACTION_LIMIT] income and expense entries combined.
///
/// Entries are ordered by date, newest first. Entries on the same date are
/// ordered by the most recently recorded, then by ID, then income before
/// expenses.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn recent_transactions(connection: &Connection) -> Result<Vec<RecentTransaction>, Error> {
    connection
        .prepare(
            "SELECT 'income' AS kind, id, amount, date, description, source AS extra, created_at
             FROM income
             UNION ALL
             SELECT 'expense' AS kind, id, amount, date, description, category AS extra, created_at
             FROM expense
             ORDER BY date DESC, created_at DESC, id DESC, kind DESC
             LIMIT ?1",
        )?
        .query_map([RECENT_TRANSACTION_LIMIT], map_recent_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// The total spent per category, largest total first.
///
/// Categories with equal totals are ordered by name.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn category_totals(connection: &Connection) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) AS total
             FROM expense
             GROUP BY category
             ORDER BY total DESC, category ASC",
        )?
        .query_map([], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// The number of expenses and the total spent per category, largest total first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn category_statistics(connection: &Connection) -> Result<Vec<CategoryStatistics>, Error> {
    connection
        .prepare(
            "SELECT category, COUNT(*) AS count, SUM(amount) AS total
             FROM expense
             GROUP BY category
             ORDER BY total DESC, category ASC",
        )?
        .query_map([], |row| {
            Ok(CategoryStatistics {
                category: row.get(0)?,
                count: row.get(1)?,
                total: row.get(2)?,
            })
        })?
        .map(|maybe_statistics| maybe_statistics.map_err(|error| error.into()))
        .collect()
}

/// The total spent per month, newest month first.
///
/// Only months with at least one expense are included.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn monthly_totals(connection: &Connection) -> Result<Vec<MonthlyTotal>, Error> {
    connection
        .prepare(
            "SELECT totals.year, totals.month, totals.total, budget.amount
             FROM (
                SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                       CAST(strftime('%m', date) AS INTEGER) AS month,
                       SUM(amount) AS total
                FROM expense
                GROUP BY year, month
             ) AS totals
             LEFT JOIN budget ON budget.year = totals.year AND budget.month = totals.month
             ORDER BY totals.year DESC, totals.month DESC",
        )?
        .query_map([], |row| {
            Ok(MonthlyTotal {
                year: row.get(0)?,
                month: row.get(1)?,
                total: row.get(2)?,
                budget: row.get(3)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

fn map_recent_transaction_row(row: &Row) -> Result<RecentTransaction, rusqlite::Error> {
    Ok(RecentTransaction {
        kind: row.get(0)?,
        id: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        extra: row.get(5)?,
        created_at: row.get(6)?,
    })
}
