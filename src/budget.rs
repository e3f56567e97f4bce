//! Monthly budgets: a planned spending ceiling for one month of one year.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{Amount, Error, form::require_fields};

/// The spending ceiling for a month.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    /// The ID assigned by the database.
    pub id: i64,
    /// The month of the year, from 1 (January) to 12 (December).
    pub month: u8,
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// How much money may be spent in the month.
    pub amount: Amount,
    /// When the budget was first recorded, in UTC.
    pub created_at: PrimitiveDateTime,
}

/// The fields of a budget that the user provides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewBudget {
    /// The month of the year, from 1 to 12.
    pub month: u8,
    /// The calendar year.
    pub year: i32,
    /// How much money may be spent in the month.
    pub amount: Amount,
}

/// The form data for setting a monthly budget.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BudgetForm {
    #[serde(rename = "mois", default)]
    pub month: String,
    #[serde(rename = "annee", default)]
    pub year: String,
    #[serde(rename = "montant", default)]
    pub amount: String,
}

impl BudgetForm {
    /// Check the form and convert it into a budget.
    ///
    /// # Errors
    /// Returns a validation error if a field is missing, the month is not
    /// from 1 to 12, the year is not a four digit year or the amount cannot
    /// be parsed.
    pub fn validate(&self) -> Result<NewBudget, Error> {
        require_fields(&[
            ("Month", self.month.as_str()),
            ("Year", self.year.as_str()),
            ("Amount", self.amount.as_str()),
        ])?;

        let month = self
            .month
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| Error::InvalidMonth(self.month.clone()))?;

        let year = self
            .year
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|year| (1000..=9999).contains(year))
            .ok_or_else(|| Error::InvalidYear(self.year.clone()))?;

        Ok(NewBudget {
            month,
            year,
            amount: Amount::parse(&self.amount)?,
        })
    }
}

/// Set the budget for a month, replacing the amount if one is already set.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn set_budget(new_budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(
            "INSERT INTO budget (month, year, amount) VALUES (?1, ?2, ?3)
             ON CONFLICT(month, year) DO UPDATE SET amount = excluded.amount
             RETURNING id, month, year, amount, created_at",
        )?
        .query_row(
            (new_budget.month, new_budget.year, new_budget.amount),
            map_budget_row,
        )
        .map_err(|error| error.into())
}

/// Get the budget for `month` of `year`, if one has been set.
#[cfg(test)]
pub fn get_budget(month: u8, year: i32, connection: &Connection) -> Result<Option<Budget>, Error> {
    use rusqlite::OptionalExtension;

    connection
        .prepare(
            "SELECT id, month, year, amount, created_at FROM budget
             WHERE month = ?1 AND year = ?2",
        )?
        .query_row((month, year), map_budget_row)
        .optional()
        .map_err(|error| error.into())
}

/// Create the budget table if it does not exist.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
            year INTEGER NOT NULL,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(month, year)
        )",
        (),
    )?;

    Ok(())
}

fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        month: row.get(1)?,
        year: row.get(2)?,
        amount: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{Amount, Error};

    use super::{BudgetForm, NewBudget, create_budget_table, get_budget, set_budget};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_budget_table(&conn).unwrap();
        conn
    }

    fn budget(month: u8, year: i32, cents: i64) -> NewBudget {
        NewBudget {
            month,
            year,
            amount: Amount::from_cents(cents),
        }
    }

    #[test]
    fn set_then_get() {
        let conn = get_test_connection();

        let created = set_budget(budget(1, 2024, 150_000), &conn).unwrap();

        assert_eq!(get_budget(1, 2024, &conn).unwrap(), Some(created));
    }

    #[test]
    fn setting_twice_replaces_amount() {
        let conn = get_test_connection();
        let first = set_budget(budget(1, 2024, 150_000), &conn).unwrap();

        let second = set_budget(budget(1, 2024, 90_000), &conn).unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.amount, Amount::from_cents(90_000));
        let count: u32 = conn
            .query_row("SELECT COUNT(*) FROM budget", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn get_missing_budget_is_none() {
        let conn = get_test_connection();
        set_budget(budget(1, 2024, 150_000), &conn).unwrap();

        assert_eq!(get_budget(2, 2024, &conn).unwrap(), None);
        assert_eq!(get_budget(1, 2025, &conn).unwrap(), None);
    }

    #[test]
    fn form_becomes_budget() {
        let form = BudgetForm {
            month: "3".to_owned(),
            year: "2024".to_owned(),
            amount: "1200,50".to_owned(),
        };

        assert_eq!(form.validate(), Ok(budget(3, 2024, 120_050)));
    }

    #[test]
    fn form_rejects_month_out_of_range() {
        for month in ["0", "13", "mars"] {
            let form = BudgetForm {
                month: month.to_owned(),
                year: "2024".to_owned(),
                amount: "100".to_owned(),
            };

            assert_eq!(form.validate(), Err(Error::InvalidMonth(month.to_owned())));
        }
    }

    #[test]
    fn form_rejects_invalid_year() {
        let form = BudgetForm {
            month: "1".to_owned(),
            year: "24".to_owned(),
            amount: "100".to_owned(),
        };

        assert_eq!(form.validate(), Err(Error::InvalidYear("24".to_owned())));
    }

    #[test]
    fn form_reports_missing_fields() {
        assert_eq!(
            BudgetForm::default().validate(),
            Err(Error::MissingFields(vec!["Month", "Year", "Amount"]))
        );
    }
}
