#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_action, assert_form_alert, assert_form_input, assert_form_input_with_value,
    assert_form_select, assert_form_submit_button, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_status_ok, get_header};

use crate::{AppState, db::ConnectionManager};

/// An app state backed by a new, initialized in-memory database.
#[track_caller]
pub(crate) fn get_test_state() -> AppState {
    let db = ConnectionManager::open_in_memory().expect("Could not create in-memory database");
    crate::db::initialize(&db).expect("Could not initialize database");

    AppState::new(db, "foobar", "Etc/UTC")
}
