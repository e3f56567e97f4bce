use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Amount, Error,
    expense::NewExpense,
    form::{non_blank, parse_date, require_fields},
};

/// The form data for adding an expense.
///
/// Every field defaults to an empty string so that a missing field is
/// reported as a validation error rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExpenseForm {
    #[serde(rename = "montant", default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "categorie", default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
}

impl ExpenseForm {
    /// An empty form with the date set to `date`.
    pub fn with_date(date: Date) -> Self {
        Self {
            date: date.to_string(),
            ..Default::default()
        }
    }

    /// Check the form and convert it into an expense.
    ///
    /// Tags are optional, blank tags become `None`.
    ///
    /// # Errors
    /// Returns a validation error if a required field is missing, or if the
    /// amount or date cannot be parsed.
    pub fn validate(&self) -> Result<NewExpense, Error> {
        require_fields(&[
            ("Amount", self.amount.as_str()),
            ("Date", self.date.as_str()),
            ("Description", self.description.as_str()),
            ("Category", self.category.as_str()),
        ])?;

        Ok(NewExpense {
            amount: Amount::parse(&self.amount)?,
            date: parse_date(&self.date)?,
            description: self.description.trim().to_owned(),
            category: self.category.trim().to_owned(),
            tags: non_blank(&self.tags),
        })
    }
}
