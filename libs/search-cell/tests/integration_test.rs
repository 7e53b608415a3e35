use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use search_cell::router::search_routes;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn create_test_app(backend_url: &str) -> Router {
    search_routes(Arc::new(TestConfig::for_backend(backend_url)))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn doctor_ids(body: &serde_json::Value) -> Vec<i64> {
    body["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn ent_search_merges_terms_and_dedupes_by_id() {
    let mock_server = MockServer::start().await;

    // First term is slow on purpose: merge order must follow term order,
    // not completion order.
    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "Otolaryngology (ENT)"))
        .and(query_param("city", "Abbottabad"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([
                    MockBackendResponses::doctor_record(1, "Dr. Ayesha Tariq", "Otolaryngology (ENT)", "Abbottabad"),
                    MockBackendResponses::doctor_record(2, "Dr. Bilal Shah", "Otolaryngology (ENT)", "Abbottabad"),
                ])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "Otolaryngology"))
        .and(query_param("city", "Abbottabad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::doctor_record(2, "Dr. Bilal Shah", "Otolaryngology", "Abbottabad"),
            MockBackendResponses::doctor_record(3, "Dr. Sana Malik", "Otolaryngology", "Abbottabad"),
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/doctors?query=ent&city=Abbottabad").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searched"], true);
    assert_eq!(body["superseded"], false);
    assert_eq!(
        body["terms"],
        json!(["Otolaryngology (ENT)", "Otolaryngology"])
    );
    assert_eq!(doctor_ids(&body), vec![1, 2, 3]);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn failed_term_fetch_is_tolerated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "Endocrinology"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "General Physician"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::doctor_record(9, "Dr. Hina Raza", "General Physician", "Lahore"),
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/doctors?query=diabetes&city=Lahore").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doctor_ids(&body), vec![9]);
}

#[tokio::test]
async fn all_fetches_failing_yields_empty_results_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/doctors?query=ent&city=Karachi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searched"], true);
    assert_eq!(body["doctors"], json!([]));
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn empty_query_and_city_never_hit_the_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());

    for uri in ["/doctors", "/doctors?query=&city=", "/doctors?query=%20%20&city="] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["searched"], false);
        assert_eq!(body["doctors"], json!([]));
    }

    mock_server.verify().await;
}

#[tokio::test]
async fn unrecognized_query_is_forwarded_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "unknown-disease-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let (status, body) = get_json(app, "/doctors?query=unknown-disease-xyz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searched"], true);
    assert_eq!(body["terms"], json!(["unknown-disease-xyz"]));
    assert_eq!(body["total"], 0);

    mock_server.verify().await;
}

// Mounts a slow Neurology search and a fast Dermatology one so a "migraine"
// search can still be in flight when an "acne" search completes.
async fn mount_slow_and_fast_searches(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "Neurology"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(400))
                .set_body_json(json!([
                    MockBackendResponses::doctor_record(11, "Dr. Slow", "Neurology", "Multan"),
                ])),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctors/search"))
        .and(query_param("term", "Dermatology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::doctor_record(12, "Dr. Fast", "Dermatology", "Multan"),
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn newer_search_from_same_client_supersedes_older_one() {
    let mock_server = MockServer::start().await;
    mount_slow_and_fast_searches(&mock_server).await;

    let app = create_test_app(&mock_server.uri());

    let stale = tokio::spawn({
        let app = app.clone();
        async move { get_json(app, "/doctors?query=migraine&city=Multan&client_id=tab-1").await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (fresh_status, fresh_body) =
        get_json(app, "/doctors?query=acne&city=Multan&client_id=tab-1").await;
    assert_eq!(fresh_status, StatusCode::OK);
    assert_eq!(fresh_body["superseded"], false);
    assert_eq!(doctor_ids(&fresh_body), vec![12]);

    let (stale_status, stale_body) = stale.await.unwrap();
    assert_eq!(stale_status, StatusCode::OK);
    assert_eq!(stale_body["superseded"], true);
    assert_eq!(stale_body["doctors"], json!([]));
}

#[tokio::test]
async fn searches_from_different_clients_never_supersede_each_other() {
    let mock_server = MockServer::start().await;
    mount_slow_and_fast_searches(&mock_server).await;

    let app = create_test_app(&mock_server.uri());

    // Client A's slow search is still in flight when client B's completes;
    // both must come back with their own results.
    let slow = tokio::spawn({
        let app = app.clone();
        async move { get_json(app, "/doctors?query=migraine&city=Multan&client_id=tab-a").await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (fast_status, fast_body) =
        get_json(app, "/doctors?query=acne&city=Multan&client_id=tab-b").await;
    assert_eq!(fast_status, StatusCode::OK);
    assert_eq!(fast_body["superseded"], false);
    assert_eq!(doctor_ids(&fast_body), vec![12]);

    let (slow_status, slow_body) = slow.await.unwrap();
    assert_eq!(slow_status, StatusCode::OK);
    assert_eq!(slow_body["superseded"], false);
    assert_eq!(doctor_ids(&slow_body), vec![11]);
}

#[tokio::test]
async fn searches_without_a_client_token_always_complete() {
    let mock_server = MockServer::start().await;
    mount_slow_and_fast_searches(&mock_server).await;

    let app = create_test_app(&mock_server.uri());

    let slow = tokio::spawn({
        let app = app.clone();
        async move { get_json(app, "/doctors?query=migraine&city=Multan").await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (_, fast_body) = get_json(app, "/doctors?query=acne&city=Multan").await;
    assert_eq!(fast_body["superseded"], false);

    let (_, slow_body) = slow.await.unwrap();
    assert_eq!(slow_body["superseded"], false);
    assert_eq!(doctor_ids(&slow_body), vec![11]);
}

#[tokio::test]
async fn specializations_endpoint_lists_canonical_terms() {
    let app = create_test_app("http://localhost:0");
    let (status, body) = get_json(app, "/specializations").await;

    assert_eq!(status, StatusCode::OK);
    let specializations = body["specializations"].as_array().unwrap();
    assert!(specializations.iter().any(|s| s == "Otolaryngology (ENT)"));
    assert!(specializations.iter().any(|s| s == "Dermatology"));
    assert_eq!(body["total"], specializations.len());
}
