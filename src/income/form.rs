use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Amount, Error,
    form::{parse_date, require_fields},
    income::NewIncome,
};

/// The form data for adding an income entry.
///
/// Every field defaults to an empty string so that a missing field is
/// reported as a validation error rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IncomeForm {
    #[serde(rename = "montant", default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
}

impl IncomeForm {
    /// An empty form with the date set to `date`.
    pub fn with_date(date: Date) -> Self {
        Self {
            date: date.to_string(),
            ..Default::default()
        }
    }

    /// Check the form and convert it into an income entry.
    ///
    /// # Errors
    /// Returns a validation error if a field is missing, or if the amount or
    /// date cannot be parsed.
    pub fn validate(&self) -> Result<NewIncome, Error> {
        require_fields(&[
            ("Amount", self.amount.as_str()),
            ("Date", self.date.as_str()),
            ("Description", self.description.as_str()),
            ("Source", self.source.as_str()),
        ])?;

        Ok(NewIncome {
            amount: Amount::parse(&self.amount)?,
            date: parse_date(&self.date)?,
            description: self.description.trim().to_owned(),
            source: self.source.trim().to_owned(),
        })
    }
}
