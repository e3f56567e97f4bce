//! Defines the page and the endpoint for adding an expense.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::{AlertType, alert},
    db::ConnectionManager,
    endpoints,
    expense::{EXPENSE_CATEGORIES, core::create_expense, form::ExpenseForm},
    flash::set_flash,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed to show the expense form and add expenses.
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    /// Opens database connections for adding expenses.
    pub db: ConnectionManager,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Paris".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the form for adding an expense with today's date filled in.
pub async fn get_add_expense_page(
    State(state): State<ExpenseFormState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(add_expense_view(&ExpenseForm::with_date(today), None).into_response())
}

/// A route handler for adding an expense, redirects to the expense list on success.
///
/// Invalid forms are shown again with an error message and nothing is saved.
pub async fn add_expense_endpoint(
    State(state): State<ExpenseFormState>,
    jar: PrivateCookieJar,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let new_expense = match form.validate() {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("rejected expense form: {error}");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                add_expense_view(&form, Some(&error.to_string())),
            )
                .into_response();
        }
    };

    match state
        .db
        .with_transaction(|connection| create_expense(new_expense, connection))
    {
        Ok(expense) => {
            tracing::info!("created expense {}", expense.id);
            let jar = set_flash(jar, "Expense added.");

            (jar, Redirect::to(endpoints::EXPENSES_VIEW)).into_response()
        }
        Err(error @ Error::DatabaseUnavailable(_)) => error.into_response(),
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                add_expense_view(
                    &form,
                    Some("The expense could not be saved, check the server logs for more details."),
                ),
            )
                .into_response()
        }
    }
}

fn add_expense_view(form: &ExpenseForm, error_message: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_EXPENSE).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            @if let Some(error_message) = error_message {
                (alert(AlertType::Error, error_message))
            }

            form
                method="post"
                action=(endpoints::ADD_EXPENSE)
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Expense" }

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
                    label for="categorie" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="categorie"
                        id="categorie"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" disabled selected[form.category.is_empty()] { "Choose a category" }

                        @for category in EXPENSE_CATEGORIES {
                            option value=(category) selected[form.category == category] { (category) }
                        }
                    }
                }

                div
                {
                    label for="tags" class=(FORM_LABEL_STYLE) { "Tags (optional)" }

                    input
                        name="tags"
                        id="tags"
                        type="text"
                        placeholder="work, travel"
                        value=(form.tags)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }
        }
    };

    base("Add Expense", &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::{Form, PrivateCookieJar};
    use scraper::Selector;

    use crate::{
        Amount, AppState, EXPENSE_CATEGORIES, endpoints,
        expense::{count_expenses, create_page::ExpenseFormState, form::ExpenseForm, get_all_expenses},
        test_utils::{
            assert_form_action, assert_form_alert, assert_form_input, assert_form_select,
            assert_form_submit_button, assert_status_ok, assert_valid_html, get_header,
            get_test_state, must_get_form, parse_html_document,
        },
    };

    use super::{add_expense_endpoint, get_add_expense_page};

    fn filled_form() -> ExpenseForm {
        ExpenseForm {
            amount: "50.00".to_owned(),
            date: "2024-01-10".to_owned(),
            description: "lunch".to_owned(),
            category: "Alimentation".to_owned(),
            tags: String::new(),
        }
    }

    async fn post_form(state: &AppState, form: ExpenseForm) -> axum::response::Response {
        add_expense_endpoint(
            State(ExpenseFormState::from_ref(state)),
            PrivateCookieJar::new(state.cookie_key.clone()),
            Form(form),
        )
        .await
        .into_response()
    }

    fn expense_count(state: &AppState) -> u32 {
        state
            .db
            .with_transaction(|connection| count_expenses(connection))
            .unwrap()
    }

    #[tokio::test]
    async fn page_has_form_with_categories() {
        let state = get_test_state();

        let response = get_add_expense_page(State(ExpenseFormState::from_ref(&state)))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_form_action(&form, endpoints::ADD_EXPENSE);
        assert_form_input(&form, "montant", "number");
        assert_form_input(&form, "date", "date");
        assert_form_input(&form, "description", "text");
        assert_form_select(&form, "categorie", &EXPENSE_CATEGORIES);
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn tags_input_is_optional() {
        let state = get_test_state();

        let response = get_add_expense_page(State(ExpenseFormState::from_ref(&state)))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let tags = document
            .select(&Selector::parse("input[name=tags]").unwrap())
            .next()
            .expect("want a tags input");
        assert_eq!(tags.value().attr("required"), None);
    }

    #[tokio::test]
    async fn can_add_expense() {
        let state = get_test_state();

        let response = post_form(&state, filled_form()).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::EXPENSES_VIEW);
        let expenses = state
            .db
            .with_transaction(|connection| get_all_expenses(connection))
            .unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, Amount::from_cents(5_000));
        assert_eq!(expenses[0].category, "Alimentation");
        assert_eq!(expenses[0].tags, None);
    }

    #[tokio::test]
    async fn missing_category_shows_form_again_without_saving() {
        let state = get_test_state();
        let form = ExpenseForm {
            category: String::new(),
            ..filled_form()
        };

        let response = post_form(&state, form).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_form_alert(
            &document,
            "All required fields must be filled in (missing: Category)",
        );
        assert_eq!(expense_count(&state), 0);
    }

    #[tokio::test]
    async fn invalid_form_keeps_chosen_category() {
        let state = get_test_state();
        let form = ExpenseForm {
            amount: String::new(),
            category: "Transport".to_owned(),
            ..filled_form()
        };

        let response = post_form(&state, form).await;

        let document = parse_html_document(response).await;
        let selected = document
            .select(&Selector::parse("option[selected]").unwrap())
            .next()
            .expect("want a selected option");
        assert_eq!(selected.value().attr("value"), Some("Transport"));
    }

    #[tokio::test]
    async fn statement_failure_shows_form_again() {
        let state = get_test_state();
        state
            .db
            .with_transaction(|connection| {
                connection.execute("DROP TABLE expense", ())?;
                Ok(())
            })
            .unwrap();

        let response = post_form(&state, filled_form()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let document = parse_html_document(response).await;
        assert_form_alert(
            &document,
            "The expense could not be saved, check the server logs for more details.",
        );
    }
}
