//! Guards for the dashboard: check the session cookie, slide its expiry
//! forward and send visitors without a session to the log-in page.

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState,
    auth::{
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
    timezone::get_local_offset,
};

/// Every authenticated request keeps the session alive for at least this long.
const SESSION_EXTENSION: Duration = Duration::minutes(5);

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key for decrypting and re-encrypting the auth cookie.
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// How a visitor without a session is sent to the log-in page.
#[derive(Debug, Clone, Copy)]
enum LogInRedirect {
    /// `303 See Other`, for full page loads.
    Page,
    /// An `HX-Redirect` header so htmx loads the log-in page in place of the
    /// whole page rather than swapping it into a fragment.
    Htmx,
}

impl LogInRedirect {
    fn respond(self, request: &Request) -> Response {
        let url = build_log_in_redirect_url(request)
            .or_else(|| build_log_in_redirect_url_from_target(endpoints::DASHBOARD_VIEW))
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned());

        match self {
            LogInRedirect::Page => Redirect::to(&url).into_response(),
            LogInRedirect::Htmx => (HxRedirect(url), StatusCode::OK).into_response(),
        }
    }
}

async fn guard(
    state: AuthState,
    mut request: Request,
    next: Next,
    log_in_redirect: LogInRedirect,
) -> Response {
    let jar = PrivateCookieJar::from_headers(request.headers(), state.cookie_key);

    let user_id = match get_token_from_cookies(&jar) {
        Ok(token) => token.user_id,
        Err(error) => {
            tracing::debug!("No session for {}: {error}", request.uri());
            return log_in_redirect.respond(&request);
        }
    };

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!(
            "Invalid timezone {}, redirecting to log in page.",
            state.local_timezone
        );
        return log_in_redirect.respond(&request);
    };

    request.extensions_mut().insert(user_id);
    let response = next.run(request).await;

    match extend_auth_cookie_duration_if_needed(jar, SESSION_EXTENSION, local_offset) {
        Ok(jar) => (jar, response).into_response(),
        Err(error) => {
            tracing::error!("Could not extend the session for user {user_id}: {error}");
            response
        }
    }
}

/// Middleware for pages: checks for a valid auth cookie and redirects to the
/// log-in page if there is none.
///
/// Route handlers receive the user with `Extension(user_id): Extension<UserID>`.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, request, next, LogInRedirect::Page).await
}

/// Middleware for htmx endpoints: like [auth_guard], but the redirect is
/// sent as an `HX-Redirect` header so htmx navigates the whole page.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, request, next, LogInRedirect::Htmx).await
}
