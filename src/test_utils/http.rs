use axum::{body::Body, response::Response};

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    let location = response
        .headers()
        .get("hx-redirect")
        .expect("Headers missing hx-redirect")
        .to_str()
        .expect("Could not convert to str");

    assert_eq!(location, endpoint);
}

#[track_caller]
pub(crate) fn assert_no_hx_redirect(response: &Response<Body>) {
    assert!(
        response.headers().get("hx-redirect").is_none(),
        "want no hx-redirect header, got {:?}",
        response.headers().get("hx-redirect")
    );
}
