//! The page listing every expense.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    Error,
    alert::success_alert,
    db::ConnectionManager,
    endpoints,
    expense::{Expense, get_all_expenses},
    flash::take_flash,
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE,
        TAG_BADGE_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
};

/// Renders the expenses, newest first, and any pending flash message.
pub async fn get_expenses_page(
    State(db): State<ConnectionManager>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let expenses = db
        .with_transaction(|connection| get_all_expenses(connection))
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    let (jar, flash) = take_flash(jar);

    Ok((jar, expenses_view(&expenses, flash.as_deref())).into_response())
}

fn expenses_view(expenses: &[Expense], flash: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (success_alert(flash))

            div class="flex justify-between items-center w-full max-w-screen-md mb-4"
            {
                h2 class="text-xl font-bold" { "Expenses" }
                (link(endpoints::ADD_EXPENSE, "Add expense"))
            }

            div class="relative w-full max-w-screen-md overflow-x-auto shadow-md rounded-lg"
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Tags" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            tr
                                class=(TABLE_ROW_STYLE)
                                data-expense-id=(expense.id)
                                title={"Recorded " (expense.created_at)}
                            {
                                td class=(TABLE_CELL_STYLE) { (expense.date) }
                                td class=(TABLE_CELL_STYLE) { (expense.description) }
                                td class=(TABLE_CELL_STYLE) { (expense.category) }
                                td class={(TABLE_CELL_STYLE) " space-x-1"}
                                {
                                    @for tag in expense.tag_list() {
                                        span class=(TAG_BADGE_STYLE) { (tag) }
                                    }
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(expense.amount)) }
                            }
                        }

                        @if expenses.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No expenses recorded yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Expenses", &content)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum_extra::extract::PrivateCookieJar;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        Amount,
        expense::{NewExpense, create_expense},
        flash::set_flash,
        test_utils::{assert_status_ok, assert_valid_html, get_test_state, parse_html_document},
    };

    use super::get_expenses_page;

    #[tokio::test]
    async fn shows_tags_as_badges() {
        let state = get_test_state();
        state
            .db
            .with_transaction(|connection| {
                create_expense(
                    NewExpense {
                        amount: Amount::from_cents(5_000),
                        date: date!(2024 - 01 - 10),
                        description: "lunch".to_owned(),
                        category: "Alimentation".to_owned(),
                        tags: Some("work, team".to_owned()),
                    },
                    connection,
                )
            })
            .unwrap();

        let response = get_expenses_page(
            State(state.db.clone()),
            PrivateCookieJar::new(state.cookie_key.clone()),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let badge_selector = Selector::parse("tr[data-expense-id] span").unwrap();
        let tags: Vec<String> = document
            .select(&badge_selector)
            .map(|badge| badge.text().collect())
            .collect();
        assert_eq!(tags, vec!["work", "team"]);
    }

    #[tokio::test]
    async fn shows_flash_message() {
        let state = get_test_state();
        let jar = set_flash(PrivateCookieJar::new(state.cookie_key.clone()), "Expense added.");

        let response = get_expenses_page(State(state.db.clone()), jar).await.unwrap();

        let document = parse_html_document(response).await;
        let alert_selector = Selector::parse("div[role=status]").unwrap();
        let text: String = document
            .select(&alert_selector)
            .next()
            .expect("want a success alert")
            .text()
            .collect();
        assert_eq!(text.trim(), "Expense added.");
    }
}
