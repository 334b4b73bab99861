//! The dashboard tabs shown to logged in users.
//!
//! Every tab loads the user's customers and transactions through
//! [load_collections] and renders inside [dashboard_page].

mod cards;
mod handlers;
mod recent;
mod shell;
mod stats;

pub use handlers::get_dashboard_page;
pub(crate) use recent::format_signed_amount;
pub use shell::{DashboardState, dashboard_page, load_collections};
