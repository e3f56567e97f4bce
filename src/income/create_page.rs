//! Defines the page and the endpoint for adding an income entry.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that reports which field failed to parse
// instead of axum::Form's generic rejection.
use axum_extra::extract::{Form, PrivateCookieJar};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::{AlertType, alert},
    db::ConnectionManager,
    endpoints,
    flash::set_flash,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    income::{core::create_income, form::IncomeForm},
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed to show the income form and add income.
#[derive(Debug, Clone)]
pub struct IncomeFormState {
    /// Opens database connections for adding income.
    pub db: ConnectionManager,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Paris".
    pub local_timezone: String,
}

impl FromRef<AppState> for IncomeFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the form for adding income with today's date filled in.
pub async fn get_add_income_page(
    State(state): State<IncomeFormState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(add_income_view(&IncomeForm::with_date(today), None).into_response())
}

/// A route handler for adding income, redirects to the income list on success.
///
/// Invalid forms are shown again with an error message and nothing is saved.
pub async fn add_income_endpoint(
    State(state): State<IncomeFormState>,
    jar: PrivateCookieJar,
    Form(form): Form<IncomeForm>,
) -> Response {
    let new_income = match form.validate() {
        Ok(new_income) => new_income,
        Err(error) => {
            tracing::debug!("rejected income form: {error}");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                add_income_view(&form, Some(&error.to_string())),
            )
                .into_response();
        }
    };

    match state
        .db
        .with_transaction(|connection| create_income(new_income, connection))
    {
        Ok(income) => {
            tracing::info!("created income {}", income.id);
            let jar = set_flash(jar, "Income added.");

            (jar, Redirect::to(endpoints::INCOME_VIEW)).into_response()
        }
        Err(error @ Error::DatabaseUnavailable(_)) => error.into_response(),
        Err(error) => {
            tracing::error!("could not create income: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                add_income_view(
                    &form,
                    Some("The income could not be saved, check the server logs for more details."),
                ),
            )
                .into_response()
        }
    }
}

fn add_income_view(form: &IncomeForm, error_message: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_INCOME).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            @if let Some(error_message) = error_message {
                (alert(AlertType::Error, error_message))
            }

            form
                method="post"
                action=(endpoints::ADD_INCOME)
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Income" }

                div
                {
                    label for="montant" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        name="montant"
                        id="montant"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        value=(form.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(form.date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        required
                        value=(form.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="source" class=(FORM_LABEL_STYLE) { "Source" }

                    input
                        name="source"
                        id="source"
                        type="text"
                        placeholder="Salary, freelance, gift..."
                        required
                        value=(form.source)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Income" }
            }
        }
    };

    base("Add Income", &content)
}
