//! Validation shared by the entry forms.

use time::{Date, macros::format_description};

use crate::Error;

/// Check that every `(label, value)` pair has a non-blank value.
///
/// # Errors
/// Returns [Error::MissingFields] with the labels of all blank values.
pub(crate) fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), Error> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingFields(missing))
    }
}

/// Parse a date in the format used by HTML date inputs, e.g. "2024-01-31".
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// `text` with surrounding whitespace removed, or `None` if nothing is left.
pub(crate) fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
