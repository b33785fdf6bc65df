mod common;

use std::{net::SocketAddr, num::NonZeroU32};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header::RETRY_AFTER},
};
use common::{app, body_text, build, post_form, post_json, send, settings};

const VALID: &str = r#"{"email":"jane@example.com","message":"We would like to discuss a project."}"#;

#[tokio::test]
async fn accepted_submission_returns_success_json() {
    let app = app();
    let response = send(&app, post_json("/api/contact", VALID)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    insta::assert_snapshot!(body, @r#"{"success":true,"message":"Thank you. We will be in touch shortly."}"#);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = app();
    let response = send(
        &app,
        post_json(
            "/api/contact",
            r#"{"email":"not-an-email","message":"We would like to discuss a project."}"#,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_text(response).await;
    insta::assert_snapshot!(body, @r#"{"success":false,"message":"Please enter a valid email address."}"#);
}

#[tokio::test]
async fn short_message_is_rejected() {
    let app = app();
    let response = send(
        &app,
        post_json("/api/contact", r#"{"email":"jane@example.com","message":"hi"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_text(response).await;
    assert!(body.contains("at least 10 characters"));
}

#[tokio::test]
async fn malformed_json_is_rejected_with_json_body() {
    let app = app();
    let response = send(&app, post_json("/api/contact", "{not json")).await;
    assert!(response.status().is_client_error());

    let body = body_text(response).await;
    assert!(body.starts_with(r#"{"success":false"#));
}

fn submission(peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
    let mut request = post_json("/api/contact", VALID);
    let addr: SocketAddr = format!("{peer}:40000").parse().expect("peer address");
    request.extensions_mut().insert(ConnectInfo(addr));
    if let Some(value) = forwarded_for {
        request
            .headers_mut()
            .insert("x-forwarded-for", value.parse().expect("header value"));
    }
    request
}

#[tokio::test]
async fn submissions_past_the_window_limit_are_throttled() {
    let mut settings = settings();
    settings.contact.max_requests = NonZeroU32::new(2).expect("non-zero");
    let app = build(&settings);

    for _ in 0..2 {
        let response = send(&app, submission("203.0.113.7", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, submission("203.0.113.7", None)).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().get(RETRY_AFTER).is_some());
    let body = body_text(response).await;
    assert!(body.contains("Too many messages"));

    let response = send(&app, submission("198.51.100.20", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rotating_forwarded_for_does_not_reset_the_limit() {
    let mut settings = settings();
    settings.contact.max_requests = NonZeroU32::new(5).expect("non-zero");
    let app = build(&settings);

    let mut statuses = Vec::new();
    for n in 0..20 {
        let spoofed = format!("192.0.2.{n}");
        let response = send(&app, submission("203.0.113.7", Some(&spoofed))).await;
        statuses.push(response.status());
    }
    assert!(statuses[..5].iter().all(|status| *status == StatusCode::OK));
    assert!(
        statuses[5..]
            .iter()
            .all(|status| *status == StatusCode::TOO_MANY_REQUESTS)
    );
}

#[tokio::test]
async fn trusted_proxy_forwards_the_client_address() {
    let mut settings = settings();
    settings.contact.max_requests = NonZeroU32::new(2).expect("non-zero");
    settings.server.trusted_proxies = vec!["10.0.0.1".parse().expect("ip")];
    let app = build(&settings);

    for _ in 0..2 {
        let response = send(&app, submission("10.0.0.1", Some("203.0.113.7, 10.0.0.1"))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, submission("10.0.0.1", Some("203.0.113.7"))).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = send(&app, submission("10.0.0.1", Some("198.51.100.20"))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn html_form_rerenders_with_submitted_values() {
    let app = app();
    let response = send(
        &app,
        post_form("/contact", "email=bad&message=hello+there+friend"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_text(response).await;
    assert!(html.contains("Please enter a valid email address."));
    assert!(html.contains(r#"value="bad""#));
    assert!(html.contains("hello there friend"));
}

#[tokio::test]
async fn html_form_clears_fields_after_success() {
    let app = app();
    let response = send(
        &app,
        post_form(
            "/contact",
            "email=jane%40example.com&message=We+would+like+to+talk.",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Thank you. We will be in touch shortly."));
    assert!(!html.contains("We would like to talk."));
}
