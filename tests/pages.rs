mod common;

use axum::http::{
    StatusCode,
    header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, SET_COOKIE},
};
use common::{app, body_text, get, send};

#[tokio::test]
async fn home_renders_hero_insights_and_first_testimonial() {
    let app = app();
    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Clarity for the decisions that shape your next decade"));
    assert!(html.contains(r#"id="testimonial-slide""#));
    assert!(html.contains("Margaret Lindqvist"));
    assert!(html.contains("/ui/testimonials/stream"));
}

#[tokio::test]
async fn static_pages_render() {
    let app = app();
    for uri in ["/about", "/services", "/industries", "/careers", "/contact"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let html = body_text(send(&app, get("/about")).await).await;
    assert!(html.contains("About Vantage"));
}

#[tokio::test]
async fn industries_page_counts_case_studies() {
    let app = app();
    let html = body_text(send(&app, get("/industries")).await).await;
    assert!(html.contains("Financial Services"));
    assert!(html.contains("2 case studies"));
}

#[tokio::test]
async fn unknown_routes_render_localized_not_found() {
    let app = app();
    let response = send(&app, get("/definitely/not/here")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("Page not found"));
    assert!(html.contains(r#"<html lang="en">"#));
}

#[tokio::test]
async fn health_check_is_empty() {
    let app = app();
    let response = send(&app, get("/_health")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn bundled_assets_are_served_with_mime_type() {
    let app = app();
    let response = send(&app, get("/static/placeholder.svg")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("image/svg+xml")
    );

    let response = send(&app, get("/static/missing.css")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn explicit_language_is_remembered_in_cookie() {
    let app = app();
    let response = send(&app, get("/about?lang=fr")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("lang=fr"), "{cookie}");
    assert!(cookie.contains("Path=/"));

    let html = body_text(response).await;
    assert!(html.contains(r#"<html lang="fr">"#));
}

#[tokio::test]
async fn cookie_outranks_accept_language() {
    let app = app();
    let mut request = get("/about");
    request
        .headers_mut()
        .insert(COOKIE, "lang=es".parse().expect("header value"));
    request
        .headers_mut()
        .insert(ACCEPT_LANGUAGE, "fr-CA,fr;q=0.9".parse().expect("header value"));

    let response = send(&app, request).await;
    assert!(response.headers().get(SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains(r#"<html lang="es">"#));
}

#[tokio::test]
async fn accept_language_picks_supported_locale() {
    let app = app();
    let mut request = get("/about");
    request.headers_mut().insert(
        ACCEPT_LANGUAGE,
        "de-DE,fr;q=0.8,en;q=0.5".parse().expect("header value"),
    );

    let html = body_text(send(&app, request).await).await;
    assert!(html.contains(r#"<html lang="fr">"#));
}
