use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Assert `html` contains an error alert whose text includes `message`.
#[track_caller]
pub(crate) fn assert_alert(html: &Html, message: &str) {
    let alert = html
        .select(&Selector::parse("[role=alert]").unwrap())
        .next()
        .expect("No alert found");

    assert_eq!(alert.value().attr("data-alert-type"), Some("error"));
    let text = alert.text().collect::<String>();
    assert!(
        text.contains(message),
        "want alert containing {message:?}, got {text:?}"
    );
}
