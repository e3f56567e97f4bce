//! Defines the income model and its database queries.

use rusqlite::{Connection, Row};
use time::{Date, PrimitiveDateTime};

use crate::{Amount, Error};

/// Money that was received, e.g. a salary payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    /// The ID assigned by the database.
    pub id: i64,
    /// How much money was received.
    pub amount: Amount,
    /// When the money was received.
    pub date: Date,
    /// What the income was for.
    pub description: String,
    /// Where the money came from, e.g. "Salary" or "Freelance".
    pub source: String,
    /// When the entry was recorded, in UTC.
    pub created_at: PrimitiveDateTime,
}

/// The fields of an income entry that the user provides.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    /// How much money was received.
    pub amount: Amount,
    /// When the money was received.
    pub date: Date,
    /// What the income was for.
    pub description: String,
    /// Where the money came from.
    pub source: String,
}

/// Insert an income entry and return it with its ID and creation time.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails.
pub fn create_income(new_income: NewIncome, connection: &Connection) -> Result<Income, Error> {
    connection
        .prepare(
            "INSERT INTO income (amount, date, description, source)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, date, description, source, created_at",
        )?
        .query_row(
            (
                new_income.amount,
                new_income.date,
                new_income.description,
                new_income.source,
            ),
            map_income_row,
        )
        .map_err(|error| error.into())
}

/// All income entries, newest date first.
///
/// Entries with the same date are ordered by most recently created.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_all_income(connection: &Connection) -> Result<Vec<Income>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, source, created_at
             FROM income
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_income_row)?
        .map(|maybe_income| maybe_income.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of income entries in the database.
#[cfg(test)]
pub fn count_income(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM income;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the income table if it does not exist.
pub fn create_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS income (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            source TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_income_date ON income(date);",
    )
}

fn map_income_row(row: &Row) -> Result<Income, rusqlite::Error> {
    Ok(Income {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        source: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::Amount;

    use super::{NewIncome, count_income, create_income, create_income_table, get_all_income};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_income_table(&conn).unwrap();
        conn
    }

    fn salary(cents: i64, date: time::Date) -> NewIncome {
        NewIncome {
            amount: Amount::from_cents(cents),
            date,
            description: "Monthly pay".to_owned(),
            source: "Salary".to_owned(),
        }
    }

    #[test]
    fn create_assigns_id() {
        let conn = get_test_connection();

        let income = create_income(salary(100_000, date!(2024 - 01 - 01)), &conn).unwrap();

        assert_eq!(income.id, 1);
        assert_eq!(income.amount, Amount::from_cents(100_000));
        assert_eq!(income.date, date!(2024 - 01 - 01));
        assert_eq!(income.source, "Salary");
    }

    #[test]
    fn duplicate_submissions_create_duplicate_rows() {
        let conn = get_test_connection();

        create_income(salary(100_000, date!(2024 - 01 - 01)), &conn).unwrap();
        create_income(salary(100_000, date!(2024 - 01 - 01)), &conn).unwrap();

        assert_eq!(count_income(&conn).unwrap(), 2);
    }

    #[test]
    fn lists_newest_first() {
        let conn = get_test_connection();
        create_income(salary(1, date!(2024 - 01 - 15)), &conn).unwrap();
        create_income(salary(2, date!(2024 - 03 - 01)), &conn).unwrap();
        create_income(salary(3, date!(2024 - 01 - 15)), &conn).unwrap();

        let income = get_all_income(&conn).unwrap();

        let cents: Vec<i64> = income.iter().map(|income| income.amount.cents()).collect();
        assert_eq!(cents, vec![2, 3, 1]);
    }

    #[test]
    fn lists_nothing_when_empty() {
        let conn = get_test_connection();

        assert_eq!(get_all_income(&conn).unwrap(), vec![]);
    }
}
