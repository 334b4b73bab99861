//! Alerts for telling the user why a form submission failed.
//!
//! Alerts are returned as fragments from htmx endpoints and swapped into an
//! alert container, either `#alert-container` on the base page or the slot
//! inside a dialog, so a failed form submission leaves the form where it is
//! and tells the user what went wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message with a short summary and optional details.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html!(
            div
                role="alert"
                data-alert-type="error"
                class="p-4 mb-4 text-sm rounded-lg border border-red-300 bg-red-50
                    text-red-800 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            {
                div class="flex items-start justify-between gap-4"
                {
                    p class="font-semibold" { (self.message) }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="bg-transparent border-none cursor-pointer"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "✕"
                    }
                }

                @if !self.details.is_empty() {
                    p class="mt-1" { (self.details) }
                }
            }
        )
    }

    /// Render the alert with the status code `status`.
    ///
    /// htmx only swaps error responses into the alert container when the
    /// form uses `hx-target-error`, so error alerts should use a 4xx or 5xx
    /// status.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, self.into_html()).into_response()
    }
}
