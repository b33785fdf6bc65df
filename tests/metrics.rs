mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{get, post_json, send, settings, state_with};
use metrics_util::debugging::DebuggingRecorder;
use vantage::infra::http::build_router;

#[tokio::test]
async fn public_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let state = state_with(&settings());
    let app = build_router(state.clone());

    for uri in ["/blog?category=Technology", "/ui/listings/projects?tag=Data"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(
        &app,
        post_json(
            "/api/contact",
            r#"{"email":"jane@example.com","message":"Metrics should count this one."}"#,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let session = state.carousel.open().expect("session opens");
    drop(session);

    let names: HashSet<String> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();

    let expected = [
        "vantage_listing_queries_total",
        "vantage_contact_submissions_total",
        "vantage_carousel_sessions_active",
    ];

    for metric in expected {
        assert!(names.contains(metric), "missing metric: {metric}");
    }
}
