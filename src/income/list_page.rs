//! The page listing every income entry.

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
    flash::take_flash,
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE,
        base, format_currency, link,
    },
    income::{Income, get_all_income},
    navigation::NavBar,
};

/// Renders the income entries, newest first, and any pending flash message.
pub async fn get_income_page(
    State(db): State<ConnectionManager>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let income = db
        .with_transaction(|connection| get_all_income(connection))
        .inspect_err(|error| tracing::error!("could not get income: {error}"))?;

    let (jar, flash) = take_flash(jar);

    Ok((jar, income_view(&income, flash.as_deref())).into_response())
}

fn income_view(income: &[Income], flash: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::INCOME_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (success_alert(flash))

            div class="flex justify-between items-center w-full max-w-screen-md mb-4"
            {
                h2 class="text-xl font-bold" { "Income" }
                (link(endpoints::ADD_INCOME, "Add income"))
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
                            th scope="col" class=(TABLE_CELL_STYLE) { "Source" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for entry in income {
                            tr
                                class=(TABLE_ROW_STYLE)
                                data-income-id=(entry.id)
                                title={"Recorded " (entry.created_at)}
                            {
                                td class=(TABLE_CELL_STYLE) { (entry.date) }
                                td class=(TABLE_CELL_STYLE) { (entry.description) }
                                td class=(TABLE_CELL_STYLE) { (entry.source) }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(entry.amount)) }
                            }
                        }

                        @if income.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="4" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No income recorded yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Income", &content)
}
