//! Table views for the dashboard.

use maud::{Markup, html};

use crate::{
    aggregation::{CategoryTotal, RecentTransaction, TransactionKind},
    endpoints,
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, format_currency, link,
    },
};

/// Renders the latest income and expense entries in one table.
pub(super) fn recent_transactions_table(transactions: &[RecentTransaction]) -> Markup {
    html! {
        div id="recent-transactions" class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Recent Transactions" }

            @if transactions.is_empty() {
                p
                {
                    "Nothing here yet. Start by adding "
                    (link(endpoints::ADD_INCOME, "income"))
                    " or "
                    (link(endpoints::ADD_EXPENSE, "an expense"))
                    "."
                }
            } @else {
                div class="overflow-x-auto rounded-lg shadow"
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Source / Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (recent_transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn recent_transaction_row(transaction: &RecentTransaction) -> Markup {
    let (kind, amount_style) = match transaction.kind {
        TransactionKind::Income => ("income", "text-green-600 dark:text-green-400"),
        TransactionKind::Expense => ("expense", "text-red-600 dark:text-red-400"),
    };

    html! {
        tr
            class=(TABLE_ROW_STYLE)
            data-kind=(kind)
            data-id=(transaction.id)
            title={"Recorded " (transaction.created_at)}
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.kind.label()) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.extra) }
            td class={(TABLE_CELL_STYLE) " text-right " (amount_style)}
            {
                (format_currency(transaction.amount))
            }
        }
    }
}

/// Renders the total spent per category, largest first.
pub(super) fn category_totals_table(totals: &[CategoryTotal]) -> Markup {
    html! {
        div id="category-totals" class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Expenses by Category" }

            @if totals.is_empty() {
                p { "No expenses recorded yet." }
            } @else {
                div class="overflow-x-auto rounded-lg shadow"
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                            }
                        }

                        tbody
                        {
                            @for total in totals {
                                tr class=(TABLE_ROW_STYLE) data-category=(total.category)
                                {
                                    td class=(TABLE_CELL_STYLE) { (total.category) }
                                    td class={(TABLE_CELL_STYLE) " text-right"} data-cents=(total.total.cents())
                                    {
                                        (format_currency(total.total))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
