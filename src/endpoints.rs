//! The route URIs.

/// The dashboard with totals, the balance and recent transactions.
pub const DASHBOARD_VIEW: &str = "/";
/// The page listing all income entries.
pub const INCOME_VIEW: &str = "/revenus";
/// The page listing all expense entries.
pub const EXPENSES_VIEW: &str = "/depenses";
/// The form for adding an income entry, and the route it posts to.
pub const ADD_INCOME: &str = "/ajouter-revenu";
/// The form for adding an expense entry, and the route it posts to.
pub const ADD_EXPENSE: &str = "/ajouter-depense";
/// The page with category and month breakdowns of expenses.
pub const STATISTICS_VIEW: &str = "/statistiques";
/// The route for setting the budget of a month.
pub const BUDGETS: &str = "/budgets";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
