//! Dashboard HTTP handler and view rendering.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    Amount, Error,
    aggregation::{
        CategoryTotal, RecentTransaction, balance, category_totals, recent_transactions,
        total_expenses, total_income,
    },
    dashboard::{
        cards::summary_cards,
        tables::{category_totals_table, recent_transactions_table},
    },
    db::ConnectionManager,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Holds all the data needed to render the dashboard.
#[derive(Debug)]
struct DashboardData {
    total_income: Amount,
    total_expenses: Amount,
    balance: Amount,
    recent_transactions: Vec<RecentTransaction>,
    category_totals: Vec<CategoryTotal>,
}

/// Display a page with an overview of the user's income and expenses.
pub async fn get_dashboard_page(State(db): State<ConnectionManager>) -> Result<Response, Error> {
    let data = db
        .with_transaction(|connection| build_dashboard_data(connection))
        .inspect_err(|error| tracing::error!("could not build dashboard: {error}"))?;

    Ok(dashboard_view(&data).into_response())
}

/// Fetches all data needed for the dashboard using one connection.
///
/// # Errors
/// Returns an error if any of the queries fail.
fn build_dashboard_data(connection: &Connection) -> Result<DashboardData, Error> {
    Ok(DashboardData {
        total_income: total_income(connection)?,
        total_expenses: total_expenses(connection)?,
        balance: balance(connection)?,
        recent_transactions: recent_transactions(connection)?,
        category_totals: category_totals(connection)?,
    })
}

fn dashboard_view(data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h2 class="text-xl font-bold mb-4" { "Dashboard" }

                (summary_cards(data.total_income, data.total_expenses, data.balance))

                div class="grid grid-cols-1 lg:grid-cols-2 gap-8"
                {
                    (recent_transactions_table(&data.recent_transactions))
                    (category_totals_table(&data.category_totals))
                }
            }
        }
    );

    base("Dashboard", &content)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use scraper::{Html, Selector};
    use time::{Date, macros::date};

    use crate::{
        Amount, AppState,
        expense::{NewExpense, create_expense},
        income::{NewIncome, create_income},
        test_utils::{assert_status_ok, assert_valid_html, get_test_state, parse_html_document},
    };

    use super::get_dashboard_page;

    fn add_income(state: &AppState, cents: i64, date: Date) {
        state
            .db
            .with_transaction(|connection| {
                create_income(
                    NewIncome {
                        amount: Amount::from_cents(cents),
                        date,
                        description: "January pay".to_owned(),
                        source: "salary".to_owned(),
                    },
                    connection,
                )
            })
            .unwrap();
    }

    fn add_expense(state: &AppState, cents: i64, date: Date, category: &str) {
        state
            .db
            .with_transaction(|connection| {
                create_expense(
                    NewExpense {
                        amount: Amount::from_cents(cents),
                        date,
                        description: "lunch".to_owned(),
                        category: category.to_owned(),
                        tags: None,
                    },
                    connection,
                )
            })
            .unwrap();
    }

    #[track_caller]
    fn card_cents(document: &Html, id: &str) -> i64 {
        let selector = Selector::parse(&format!("#{id} [data-cents]")).unwrap();

        document
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No card found with id {id}"))
            .value()
            .attr("data-cents")
            .unwrap()
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn empty_dashboard_shows_zero_totals() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state.db.clone())).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        for id in ["total-income", "total-expenses", "balance"] {
            assert_eq!(card_cents(&document, id), 0);
        }
        let balance_text: String = document
            .select(&Selector::parse("#balance [data-cents]").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(balance_text.trim(), "€0.00");
    }

    #[tokio::test]
    async fn single_expense_shows_in_totals_and_categories() {
        let state = get_test_state();
        add_expense(&state, 5_000, date!(2024 - 01 - 10), "Alimentation");

        let response = get_dashboard_page(State(state.db.clone())).await.unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(card_cents(&document, "total-expenses"), 5_000);
        let category_rows: Vec<_> = document
            .select(&Selector::parse("#category-totals tr[data-category]").unwrap())
            .map(|row| row.value().attr("data-category").unwrap().to_owned())
            .collect();
        assert_eq!(category_rows, vec!["Alimentation"]);
    }

    #[tokio::test]
    async fn balance_is_income_minus_expenses() {
        let state = get_test_state();
        add_income(&state, 100_000, date!(2024 - 01 - 01));
        add_expense(&state, 20_000, date!(2024 - 01 - 02), "Logement");

        let response = get_dashboard_page(State(state.db.clone())).await.unwrap();

        let document = parse_html_document(response).await;
        assert_eq!(card_cents(&document, "total-income"), 100_000);
        assert_eq!(card_cents(&document, "total-expenses"), 20_000);
        assert_eq!(card_cents(&document, "balance"), 80_000);
    }

    #[tokio::test]
    async fn recent_transactions_show_newest_first() {
        let state = get_test_state();
        add_income(&state, 100_000, date!(2024 - 01 - 01));
        add_expense(&state, 20_000, date!(2024 - 01 - 02), "Logement");

        let response = get_dashboard_page(State(state.db.clone())).await.unwrap();

        let document = parse_html_document(response).await;
        let kinds: Vec<_> = document
            .select(&Selector::parse("#recent-transactions tr[data-kind]").unwrap())
            .map(|row| row.value().attr("data-kind").unwrap().to_owned())
            .collect();
        assert_eq!(kinds, vec!["expense", "income"]);
    }

    #[tokio::test]
    async fn unreachable_database_fails_with_unavailable() {
        let db = crate::ConnectionManager::new("/this/directory/does/not/exist/budget.db");

        let result = get_dashboard_page(State(db)).await;

        assert!(
            matches!(result, Err(crate::Error::DatabaseUnavailable(_))),
            "want DatabaseUnavailable"
        );
    }
}
