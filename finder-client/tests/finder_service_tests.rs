use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use finder_client::{
    ConfigError, DoctorFinder, DoctorFinderService, FinderConfig, FinderError, HealthService,
    SearchQuery,
};
use serde_json::{Value, json};

async fn spawn_service(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), server)
}

fn client(endpoint: &str, timeout_secs: u64) -> DoctorFinderService {
    DoctorFinderService::new(FinderConfig {
        endpoint: endpoint.to_string(),
        timeout_secs: Some(timeout_secs),
    })
    .unwrap()
}

fn query() -> SearchQuery {
    SearchQuery {
        symptoms_text: "fever, cough".into(),
        city: "pune".into(),
        lat: 18.52,
        lng: 73.85,
    }
}

#[tokio::test]
async fn success_preserves_doctor_order_and_sends_contract_fields() {
    let app = Router::new().route(
        "/find-doctors",
        post(|Json(body): Json<Value>| async move {
            let specialization = format!(
                "{}|{}|{}|{}",
                body["symptoms"].as_str().unwrap_or_default(),
                body["city"].as_str().unwrap_or_default(),
                body["lat"],
                body["lng"]
            );
            Json(json!({
                "specialization": specialization,
                "doctors": [
                    { "name": "Dr. Far", "hospital": "North", "phone": "111", "distance_km": 12.0, "lat": 1.0, "lng": 1.0 },
                    { "name": "Dr. Near", "hospital": "South", "phone": "222", "distance_km": 0.4, "lat": 2.0, "lng": 2.0 }
                ]
            }))
        }),
    );
    let (base, server) = spawn_service(app).await;

    let resp = client(&base, 5).find_doctors(&query()).await.unwrap();
    assert_eq!(resp.specialization, "fever, cough|pune|18.52|73.85");
    let names: Vec<&str> = resp.doctors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Dr. Far", "Dr. Near"]);

    server.abort();
}

#[tokio::test]
async fn structured_rejection_is_a_service_error() {
    let app = Router::new().route(
        "/find-doctors",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "City not supported" })),
            )
        }),
    );
    let (base, server) = spawn_service(app).await;

    let err = client(&base, 5).find_doctors(&query()).await.unwrap_err();
    match err {
        FinderError::Service { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "City not supported");
        }
        other => panic!("expected service error, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn non_json_error_body_is_not_a_service_error() {
    let app = Router::new().route(
        "/find-doctors",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
    );
    let (base, server) = spawn_service(app).await;

    let err = client(&base, 5).find_doctors(&query()).await.unwrap_err();
    assert!(matches!(err, FinderError::HttpStatus(ref e) if e.status.as_u16() == 500));
    assert_eq!(err.service_message(), None);

    server.abort();
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let app = Router::new().route(
        "/find-doctors",
        post(|| async { Json(json!({ "specialization": "GP" })) }),
    );
    let (base, server) = spawn_service(app).await;

    let err = client(&base, 5).find_doctors(&query()).await.unwrap_err();
    assert!(matches!(err, FinderError::Decode(_)));

    server.abort();
}

#[tokio::test]
async fn slow_service_times_out() {
    let app = Router::new().route(
        "/find-doctors",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "specialization": "GP", "doctors": [] }))
        }),
    );
    let (base, server) = spawn_service(app).await;

    let err = client(&base, 1).find_doctors(&query()).await.unwrap_err();
    assert!(matches!(err, FinderError::Timeout(d) if d == Duration::from_secs(1)));

    server.abort();
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let svc = client(&format!("http://{addr}"), 2);
    let err = DoctorFinder::find_doctors(&svc, &query()).await.unwrap_err();
    assert!(matches!(err, FinderError::HttpTransport(_)));
}

#[tokio::test]
async fn health_check_reports_reachability() {
    let app = Router::new().route("/", get(|| async { "Doctor Finder Backend is running!" }));
    let (base, server) = spawn_service(app).await;

    let cfg = FinderConfig {
        endpoint: base.clone(),
        timeout_secs: Some(2),
    };
    let status = HealthService::new(&cfg).unwrap().check().await;
    assert!(status.ok, "{}", status.message);
    assert!(status.message.contains("Doctor Finder Backend is running!"));

    server.abort();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let down = HealthService::new(&FinderConfig {
        endpoint: dead,
        timeout_secs: Some(2),
    })
    .unwrap()
    .check()
    .await;
    assert!(!down.ok);
}

#[test]
fn health_service_rejects_endpoint_without_scheme() {
    let err = HealthService::new(&FinderConfig {
        endpoint: "localhost:5000".into(),
        timeout_secs: None,
    })
    .err()
    .unwrap();
    assert!(matches!(err, FinderError::Config(ConfigError::InvalidFormat { .. })), "{err}");
}
