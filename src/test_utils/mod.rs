#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use db::get_test_connection_with_user;
pub(crate) use form::{
    assert_error_target_in_dialog, assert_form_input, assert_form_optional_input,
    assert_form_select, assert_form_submit_button, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_alert, assert_valid_html, parse_html_document, parse_html_fragment,
};
pub(crate) use http::{assert_hx_redirect, assert_no_hx_redirect};
