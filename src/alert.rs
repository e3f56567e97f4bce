//! Alert banners for displaying success and error messages to users.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders a banner with `message`, styled according to `alert_type`.
pub fn alert(alert_type: AlertType, message: &str) -> Markup {
    let (role, style) = match alert_type {
        AlertType::Success => (
            "status",
            "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
            dark:bg-gray-800 dark:text-green-400",
        ),
        AlertType::Error => (
            "alert",
            "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400",
        ),
    };

    html! {
        div class={"alert w-full max-w-screen-md " (style)} role=(role)
        {
            (message)
        }
    }
}

/// Renders a success banner if there is a `message`, otherwise nothing.
pub fn success_alert(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            (alert(AlertType::Success, message))
        }
    }
}
