//! Customers: the people and businesses that money comes from or goes to.

mod core;
mod create_endpoint;
mod list_page;

pub(crate) use core::non_blank;
pub use core::{
    Customer, NewCustomer, create_customer, create_customer_table, customer_belongs_to_user,
    get_customers,
};
pub use create_endpoint::create_customer_endpoint;
pub use list_page::get_customers_page;
