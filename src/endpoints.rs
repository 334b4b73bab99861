//! The API endpoints URIs.

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users: statistics and recent activity.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and adding customers.
pub const CUSTOMERS_VIEW: &str = "/customers";
/// The page for listing and adding transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to register users.
pub const USERS: &str = "/api/users";
/// The route to create a customer.
pub const CUSTOMERS_API: &str = "/api/customers";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
