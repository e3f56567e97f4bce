//! Summary cards for the dashboard totals.

use maud::{Markup, html};

use crate::{Amount, html::format_currency};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-2";
const CARD_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const CARD_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders the total income, total expenses and balance as a row of cards.
pub(super) fn summary_cards(total_income: Amount, total_expenses: Amount, balance: Amount) -> Markup {
    let balance_style = if balance >= Amount::ZERO {
        CARD_GREEN_STYLE
    } else {
        CARD_RED_STYLE
    };

    html! {
        section class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-8"
        {
            (summary_card("total-income", "Total Income", total_income, CARD_GREEN_STYLE))
            (summary_card("total-expenses", "Total Expenses", total_expenses, CARD_RED_STYLE))
            (summary_card("balance", "Balance", balance, balance_style))
        }
    }
}

fn summary_card(id: &str, title: &str, amount: Amount, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            span class="text-sm text-gray-600 dark:text-gray-400" { (title) }
            span class={"text-2xl font-bold " (amount_style)} data-cents=(amount.cents())
            {
                (format_currency(amount))
            }
        }
    }
}
