//! The statistics page: spending per category and per month, and the form
//! for setting a monthly budget.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Month;

use crate::{
    Amount, AppState, Error,
    aggregation::{CategoryStatistics, MonthlyTotal, category_statistics, monthly_totals},
    alert::{AlertType, alert, success_alert},
    budget::{BudgetForm, set_budget},
    db::ConnectionManager,
    endpoints,
    flash::{set_flash, take_flash},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base, format_currency,
    },
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed for the statistics page and the budget form.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// Opens database connections for the statistics queries.
    pub db: ConnectionManager,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Paris".
    pub local_timezone: String,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

struct StatisticsData {
    categories: Vec<CategoryStatistics>,
    months: Vec<MonthlyTotal>,
}

fn build_statistics_data(connection: &Connection) -> Result<StatisticsData, Error> {
    Ok(StatisticsData {
        categories: category_statistics(connection)?,
        months: monthly_totals(connection)?,
    })
}

/// Display the spending per category and per month.
///
/// The budget form is filled in with the current month.
pub async fn get_statistics_page(
    State(state): State<StatisticsState>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let data = state
        .db
        .with_transaction(|connection| build_statistics_data(connection))
        .inspect_err(|error| tracing::error!("could not get statistics: {error}"))?;

    let form = BudgetForm {
        month: u8::from(today.month()).to_string(),
        year: today.year().to_string(),
        amount: String::new(),
    };
    let (jar, flash) = take_flash(jar);

    Ok((
        jar,
        statistics_view(&data, &form, flash.as_deref(), None),
    )
        .into_response())
}

/// A route handler for setting a monthly budget, redirects to the statistics
/// page on success.
///
/// Setting the budget for a month that already has one replaces its amount.
pub async fn set_budget_endpoint(
    State(state): State<StatisticsState>,
    jar: PrivateCookieJar,
    Form(form): Form<BudgetForm>,
) -> Response {
    let result = match form.validate() {
        Ok(new_budget) => state
            .db
            .with_transaction(|connection| set_budget(new_budget, connection)),
        Err(error) => Err(error),
    };

    let (status_code, error_message) = match result {
        Ok(budget) => {
            tracing::info!(
                "set budget {} for {}-{:02} to {} (first set at {})",
                budget.id,
                budget.year,
                budget.month,
                budget.amount,
                budget.created_at
            );
            let jar = set_flash(jar, "Budget saved.");

            return (jar, Redirect::to(endpoints::STATISTICS_VIEW)).into_response();
        }
        Err(error @ Error::DatabaseUnavailable(_)) => return error.into_response(),
        Err(error) if error.is_validation_error() => {
            tracing::debug!("rejected budget form: {error}");
            (StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
        }
        Err(error) => {
            tracing::error!("could not set budget: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The budget could not be saved, check the server logs for more details."
                    .to_owned(),
            )
        }
    };

    // The statistics are still shown alongside the rejected form.
    let data = match state
        .db
        .with_transaction(|connection| build_statistics_data(connection))
    {
        Ok(data) => data,
        Err(error) => {
            tracing::error!("could not get statistics: {error}");
            StatisticsData {
                categories: Vec::new(),
                months: Vec::new(),
            }
        }
    };

    (
        status_code,
        statistics_view(&data, &form, None, Some(&error_message)),
    )
        .into_response()
}

fn month_name(month: u8) -> String {
    Month::try_from(month)
        .map(|month| month.to_string())
        .unwrap_or_else(|_| month.to_string())
}

fn statistics_view(
    data: &StatisticsData,
    form: &BudgetForm,
    flash: Option<&str>,
    error_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::STATISTICS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-md space-y-8"
            {
                (success_alert(flash))

                h2 class="text-xl font-bold" { "Statistics" }

                (category_statistics_table(&data.categories))
                (monthly_totals_table(&data.months))
                (budget_form(form, error_message))
            }
        }
    );

    base("Statistics", &content)
}

fn category_statistics_table(categories: &[CategoryStatistics]) -> Markup {
    html! {
        section id="category-statistics"
        {
            h3 class="text-lg font-semibold mb-4" { "By Category" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Expenses" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                        }
                    }

                    tbody
                    {
                        @for statistics in categories {
                            tr class=(TABLE_ROW_STYLE) data-category=(statistics.category)
                            {
                                td class=(TABLE_CELL_STYLE) { (statistics.category) }
                                td class=(TABLE_CELL_STYLE) data-count=(statistics.count) { (statistics.count) }
                                td class={(TABLE_CELL_STYLE) " text-right"} data-cents=(statistics.total.cents())
                                {
                                    (format_currency(statistics.total))
                                }
                            }
                        }

                        @if categories.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="3" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No expenses recorded yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn monthly_totals_table(months: &[MonthlyTotal]) -> Markup {
    html! {
        section id="monthly-totals"
        {
            h3 class="text-lg font-semibold mb-4" { "By Month" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Spent" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Budget" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Remaining" }
                        }
                    }

                    tbody
                    {
                        @for month in months {
                            tr
                                class=(TABLE_ROW_STYLE)
                                data-period=(format!("{}-{:02}", month.year, month.month))
                            {
                                td class=(TABLE_CELL_STYLE) { (month_name(month.month)) " " (month.year) }
                                td class={(TABLE_CELL_STYLE) " text-right"} data-cents=(month.total.cents())
                                {
                                    (format_currency(month.total))
                                }

                                @match (month.budget, month.remaining_budget()) {
                                    (Some(budget), Some(remaining)) => {
                                        td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(budget)) }
                                        @if remaining < Amount::ZERO {
                                            td class={(TABLE_CELL_STYLE) " text-right text-red-600 dark:text-red-400"}
                                            {
                                                (format_currency(remaining))
                                            }
                                        } @else {
                                            td class={(TABLE_CELL_STYLE) " text-right text-green-600 dark:text-green-400"}
                                            {
                                                (format_currency(remaining))
                                            }
                                        }
                                    }
                                    _ => {
                                        td class=(TABLE_CELL_STYLE) colspan="2" { "No budget set" }
                                    }
                                }
                            }
                        }

                        @if months.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="4" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No expenses recorded yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn budget_form(form: &BudgetForm, error_message: Option<&str>) -> Markup {
    html! {
        section id="budget"
        {
            h3 class="text-lg font-semibold mb-4" { "Set a Monthly Budget" }

            @if let Some(error_message) = error_message {
                (alert(AlertType::Error, error_message))
            }

            form
                method="post"
                action=(endpoints::BUDGETS)
                class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end"
            {
                div
                {
                    label for="mois" class=(FORM_LABEL_STYLE) { "Month" }

                    input
                        name="mois"
                        id="mois"
                        type="number"
                        min="1"
                        max="12"
                        required
                        value=(form.month)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="annee" class=(FORM_LABEL_STYLE) { "Year" }

                    input
                        name="annee"
                        id="annee"
                        type="number"
                        min="1000"
                        max="9999"
                        required
                        value=(form.year)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="budget-montant" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        name="montant"
                        id="budget-montant"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        value=(form.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Budget" }
            }
        }
    }
}
