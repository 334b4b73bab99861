//! Shared page layout, styles and small view helpers.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::money::Cents;

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2.5 px-5 \
    text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700";

/// Compact button for opening the add dialogs next to a page heading.
pub const BUTTON_ADD_STYLE: &str = "px-4 py-2 text-sm font-medium bg-blue-500 \
    dark:bg-blue-600 hover:bg-blue-600 hover:dark:bg-blue-700 text-white rounded";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_RADIO_GROUP_STYLE: &str = "flex flex-row gap-2";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer h-4 w-4 shrink-0 cursor-pointer \
    text-blue-600 border-gray-300 dark:border-gray-600 focus-visible:ring-2 \
    focus-visible:ring-blue-500 focus-visible:ring-offset-2";
pub const FORM_RADIO_LABEL_STYLE: &str = "flex-1 rounded border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 text-sm font-medium \
    text-gray-700 dark:text-white cursor-pointer \
    hover:border-gray-400 hover:bg-gray-50 hover:dark:bg-gray-600 \
    peer-checked:border-blue-600 peer-checked:bg-blue-50 peer-checked:text-blue-700 \
    peer-checked:dark:border-blue-500 peer-checked:dark:bg-blue-600/20 \
    peer-checked:dark:text-blue-200";

// List styles
pub const BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-gray-800 bg-gray-100 rounded-full \
    dark:bg-gray-700 dark:text-gray-300";

pub const CARD_STYLE: &str = "p-6 bg-white border border-gray-200 rounded-lg \
    shadow dark:bg-gray-800 dark:border-gray-700";

// Amount colours
pub const INCOME_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
pub const EXPENSE_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Back Office" }

                script src="https://cdn.tailwindcss.com" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js" {}

                style
                {
                    (PreEscaped(r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#))
                }

                script src="/static/app.js" defer {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                div
                    id="alert-container"
                    data-alert-container
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p class="mb-4 text-1xl md:text-2xl tracking-tight text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600 hover:bg-blue-800
                            font-medium rounded text-sm px-5 py-2.5 text-center my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// The card shared by the log-in and registration pages.
pub fn log_in_register(form_title: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            p class="mb-6 text-2xl font-semibold text-gray-900 dark:text-white" { "Back Office" }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    (form)
                }
            }
        }
    }
}

pub fn email_input(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="email" class=(FORM_LABEL_STYLE) { "Email" }

            input
                type="email"
                name="email"
                id="email"
                placeholder="you@example.com"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                autofocus
                value=(email);

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

pub fn password_input(password: &str, min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="password" class=(FORM_LABEL_STYLE) { "Password" }

            input
                type="password"
                name="password"
                id="password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                value=(password)
                minlength=(min_length);

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// A `<dialog>` holding a form, opened by [dialog_open_button].
///
/// The dialog starts closed. The form inside is responsible for its own
/// submit button, this adds the title and a cancel button.
/// The ID of the element inside the dialog `dialog_id` that error alerts are
/// swapped into.
///
/// A modal dialog sits in the browser's top layer, above `#alert-container`,
/// so forms inside a dialog must target this element with `hx-target-error`.
pub fn dialog_alert_id(dialog_id: &str) -> String {
    format!("{dialog_id}-alert")
}

pub fn dialog(id: &str, title: &str, form: &Markup) -> Markup {
    html! {
        dialog
            id=(id)
            class="w-full max-w-md p-6 rounded-lg shadow bg-white dark:bg-gray-800
                text-gray-900 dark:text-white backdrop:bg-gray-900/50"
        {
            div class="flex items-center justify-between mb-4"
            {
                h2 class="text-xl font-semibold" { (title) }

                button
                    type="button"
                    aria-label="Cancel"
                    class="text-gray-500 hover:text-gray-900 dark:hover:text-white"
                    onclick="this.closest('dialog').close()"
                {
                    "✕"
                }
            }

            div id=(dialog_alert_id(id)) data-alert-container {}

            (form)
        }
    }
}

pub fn dialog_open_button(dialog_id: &str, text: &str) -> Markup {
    html! {
        button
            type="button"
            class=(BUTTON_ADD_STYLE)
            onclick={ "document.getElementById('" (dialog_id) "').showModal()" }
        {
            (text)
        }
    }
}

/// Format `amount` as dollars with thousands separators and two decimal
/// places, e.g. "$1,234.50" or "-$3.00".
pub fn format_currency(amount: Cents) -> String {
    let magnitude = amount.as_i64().unsigned_abs();
    let dollars = (magnitude / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };

    format!("{sign}${grouped}.{:02}", magnitude % 100)
}

/// Date format for lists, e.g. "19 October 2026".
const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none] [month repr:long] [year]");

pub fn format_long_date(date: Date) -> String {
    date.format(LONG_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a
            href=(url)
            class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
        {
          (text)
        }
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::money::Cents;

    use super::{format_currency, format_long_date};

    #[test]
    fn format_currency_zero() {
        assert_eq!(format_currency(Cents::ZERO), "$0.00");
    }

    #[test]
    fn format_currency_pads_cents() {
        assert_eq!(format_currency(Cents::new(1230)), "$12.30");
        assert_eq!(format_currency(Cents::new(-750)), "-$7.50");
        assert_eq!(format_currency(Cents::new(1)), "$0.01");
        assert_eq!(format_currency(Cents::new(-5)), "-$0.05");
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(Cents::new(100_000)), "$1,000.00");
        assert_eq!(format_currency(Cents::new(123_456_789)), "$1,234,567.89");
        assert_eq!(
            format_currency(Cents::MAX_TRANSACTION_AMOUNT),
            "$999,999,999.99"
        );
    }

    #[test]
    fn format_currency_large_totals_stay_in_plain_notation() {
        assert_eq!(
            format_currency(Cents::new(1_000_000_000_000_000_000)),
            "$10,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(Cents::new(i64::MIN)),
            "-$92,233,720,368,547,758.08"
        );
    }

    #[test]
    fn format_currency_negative_has_sign_before_symbol() {
        assert!(format_currency(Cents::new(-10_000)).starts_with("-$"));
        assert!(format_currency(Cents::new(10_000)).starts_with('$'));
    }

    #[test]
    fn long_date_spells_out_month() {
        assert_eq!(format_long_date(date!(2026 - 10 - 19)), "19 October 2026");
        assert_eq!(format_long_date(date!(2026 - 01 - 05)), "5 January 2026");
    }
}
