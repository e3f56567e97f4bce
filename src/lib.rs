//! BudgetWise is a web app for recording income and expenses.
//!
//! This library provides the HTTP routes, which directly serve HTML pages,
//! and the database queries behind them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod amount;
mod app_state;
mod budget;
mod dashboard;
mod db;
mod endpoints;
mod expense;
mod flash;
mod form;
mod html;
mod income;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod statistics;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use amount::Amount;
pub use app_state::AppState;
pub use db::{ConnectionManager, initialize as initialize_db};
pub use expense::{EXPENSE_CATEGORIES, NewExpense, create_expense};
pub use income::{NewIncome, create_income};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    internal_server_error::{InternalServerError, ServiceUnavailable},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A connection to the database could not be opened.
    ///
    /// Handlers respond with a "service unavailable" page. The next request
    /// tries to connect again.
    #[error("could not connect to the database: {0}")]
    DatabaseUnavailable(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// One or more required form fields were empty or missing.
    ///
    /// Holds the labels of the missing fields in form order.
    #[error("All required fields must be filled in (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The amount was not a positive number with at most two decimal places.
    #[error("\"{0}\" is not a valid amount, enter a positive number with at most two decimal places")]
    InvalidAmount(String),

    /// The date was not a valid date in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, use the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The month of a budget was not a number from 1 to 12.
    #[error("\"{0}\" is not a valid month, enter a number from 1 to 12")]
    InvalidMonth(String),

    /// The year of a budget was not a valid year.
    #[error("\"{0}\" is not a valid year")]
    InvalidYear(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl Error {
    /// Whether the error was caused by invalid user input rather than the server.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingFields(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDate(_)
                | Error::InvalidMonth(_)
                | Error::InvalidYear(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DatabaseUnavailable(_) => ServiceUnavailable.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn database_unavailable_is_service_unavailable() {
        let response = Error::DatabaseUnavailable("unable to open database file".to_owned())
            .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn sql_error_is_internal_server_error() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_fields_lists_field_labels() {
        let error = Error::MissingFields(vec!["Amount", "Category"]);

        assert_eq!(
            error.to_string(),
            "All required fields must be filled in (missing: Amount, Category)"
        );
        assert!(error.is_validation_error());
    }
}
