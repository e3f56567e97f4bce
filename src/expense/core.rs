//! Defines the expense model and its database queries.

use rusqlite::{Connection, Row};
use time::{Date, PrimitiveDateTime};

use crate::{Amount, Error};

/// The categories offered when adding an expense, in display order.
///
/// The database stores the category as free text and does not check it
/// against this list.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Alimentation",
    "Transport",
    "Logement",
    "Santé",
    "Loisirs",
    "Vêtements",
    "Éducation",
    "Autre",
];

/// Money that was spent, e.g. groceries or rent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID assigned by the database.
    pub id: i64,
    /// How much money was spent.
    pub amount: Amount,
    /// When the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub description: String,
    /// The category the expense is filed under, e.g. "Transport".
    pub category: String,
    /// Free-text tags, e.g. "work, travel".
    pub tags: Option<String>,
    /// When the entry was recorded, in UTC.
    pub created_at: PrimitiveDateTime,
}

impl Expense {
    /// The individual tags, with blank tags left out.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// The fields of an expense that the user provides.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// How much money was spent.
    pub amount: Amount,
    /// When the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub description: String,
    /// The category the expense is filed under.
    pub category: String,
    /// Free-text tags, `None` if the user left them empty.
    pub tags: Option<String>,
}

/// Insert an expense and return it with its ID and creation time.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "INSERT INTO expense (amount, date, description, category, tags)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, date, description, category, tags, created_at",
        )?
        .query_row(
            (
                new_expense.amount,
                new_expense.date,
                new_expense.description,
                new_expense.category,
                new_expense.tags,
            ),
            map_expense_row,
        )
        .map_err(|error| error.into())
}

/// All expenses, newest date first and most recently created first within a date.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category, tags, created_at
             FROM expense
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of expenses in the database.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table if it does not exist.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            tags TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);
        CREATE INDEX IF NOT EXISTS idx_expense_category ON expense(category);",
    )
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        tags: row.get(5)?,
        created_at: row.get(6)?,
    })
}
