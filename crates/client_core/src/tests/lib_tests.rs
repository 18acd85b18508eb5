use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::{JobStatus, ProjectId, ScenarioId},
    protocol::StartOutcome,
};
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct Captured<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Captured<T> {
    fn new() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    async fn send(&self, value: T) {
        if let Some(tx) = self.tx.lock().await.take() {
            let _ = tx.send(value);
        }
    }
}

async fn spawn_server(app: Router) -> std::io::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

const CONFIG_BODY: &str = r#"{
  "projects_configs": {
    "zeta": {"name": "Zeta", "scenarios": {"soak": {"users": 5, "run_time": "1m"}}},
    "alpha": {"name": "Alpha", "scenarios": {}}
  },
  "extra": {"b": 1, "a": 2}
}"#;

#[tokio::test]
async fn fetch_config_keeps_document_key_order() {
    let app = Router::new().route(routes::CONFIG, get(|| async { CONFIG_BODY }));
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));

    let config = client.fetch_config().await.expect("config");
    let projects: Vec<_> = config["projects_configs"]
        .as_object()
        .expect("projects object")
        .keys()
        .cloned()
        .collect();
    assert_eq!(projects, vec!["zeta", "alpha"]);
    let extra: Vec<_> = config["extra"]
        .as_object()
        .expect("extra object")
        .keys()
        .cloned()
        .collect();
    assert_eq!(extra, vec!["b", "a"]);
}

#[tokio::test]
async fn save_config_posts_raw_text_untouched() {
    let (captured, body_rx) = Captured::<String>::new();
    let app = Router::new()
        .route(
            routes::CONFIG,
            post(|State(captured): State<Captured<String>>, body: String| async move {
                captured.send(body).await;
                "saved"
            }),
        )
        .with_state(captured);
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));

    let raw = "{\n    \"projects_configs\": {},   \"unknown\": [1,2]\n}\n";
    let reply = client.save_config(raw).await.expect("save");

    assert_eq!(reply, "saved");
    assert_eq!(body_rx.await.expect("body"), raw);
}

#[tokio::test]
async fn save_config_failure_keeps_backend_text() {
    let app = Router::new().route(
        routes::CONFIG,
        post(|| async { (StatusCode::BAD_REQUEST, "1 validation error for Config") }),
    );
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));

    let err = client.save_config("{}").await.expect_err("must fail");
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(
        err.backend_text().as_deref(),
        Some("1 validation error for Config")
    );
}

#[tokio::test]
async fn active_tests_decodes_jobs_and_rejects_bad_shape() {
    let app = Router::new().route(
        routes::ACTIVE_TESTS,
        get(|| async {
            Json(serde_json::json!([{
                "test_id": "p1__smoke-20240101120000",
                "status": "completed",
                "project": "Project One",
                "scenario": "smoke",
                "in_web": false,
                "web_url": "http://localhost:8089",
                "container_id": "c1",
                "container_status": "exited",
                "start_time": "2024-01-01T12:00:00"
            }]))
        }),
    );
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));
    let jobs = client.active_tests().await.expect("jobs");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, JobStatus::Completed);

    let app = Router::new().route(
        routes::ACTIVE_TESTS,
        get(|| async { "<html>proxy error</html>" }),
    );
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));
    let err = client.active_tests().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn start_test_sends_form_fields_and_reads_outcome() {
    let (captured, request_rx) = Captured::<StartTestRequest>::new();
    let app = Router::new()
        .route(
            routes::START_TEST,
            post(
                |State(captured): State<Captured<StartTestRequest>>,
                 Json(request): Json<StartTestRequest>| async move {
                    captured.send(request).await;
                    Json(serde_json::json!({
                        "test_id": "p1__smoke-20240101120000",
                        "in_web": true,
                        "web_url": "http://localhost:8080",
                        "status": "started",
                        "container_status": "running"
                    }))
                },
            ),
        )
        .with_state(captured);
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));

    let request = StartTestRequest {
        project: ProjectId::from("p1"),
        scenario: ScenarioId::from("smoke"),
        auth_token: "secret".to_string(),
        in_web: true,
    };
    let response = client.start_test(&request).await.expect("start");

    assert_eq!(response.status, StartOutcome::Started);
    assert_eq!(response.test_id.as_str(), "p1__smoke-20240101120000");
    assert_eq!(request_rx.await.expect("request"), request);
}

#[tokio::test]
async fn stop_test_targets_job_path_and_tolerates_empty_body() {
    let (captured, id_rx) = Captured::<String>::new();
    let app = Router::new()
        .route(
            "/api/tests/stop/:test_id",
            post(
                |State(captured): State<Captured<String>>, Path(test_id): Path<String>| async move {
                    captured.send(test_id).await;
                    ""
                },
            ),
        )
        .with_state(captured);
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));

    let response = client
        .stop_test(&TestId::from("p1__smoke-20240101120000"))
        .await
        .expect("stop");

    assert!(!response.is_failure());
    assert_eq!(id_rx.await.expect("id"), "p1__smoke-20240101120000");
}

#[tokio::test]
async fn cleanup_containers_surfaces_backend_error_field() {
    let app = Router::new().route(
        routes::DOCKER_CLEAR_ALL,
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "docker daemon unavailable"})),
            )
        }),
    );
    let client = DashboardClient::new(spawn_server(app).await.expect("spawn server"));

    let err = client.cleanup_containers().await.expect_err("must fail");
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        err.backend_text().as_deref(),
        Some("docker daemon unavailable")
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = DashboardClient::with_timeout(format!("http://{addr}/"), Duration::from_secs(2))
        .expect("client");
    let err = client.completed_tests().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Transport(_)), "unexpected error: {err}");
    assert_eq!(err.backend_text(), None);
}

#[test]
fn resolves_links_against_normalized_server_url() {
    let client = DashboardClient::new(" http://dash.local:8000/ ");
    assert_eq!(client.server_url(), "http://dash.local:8000");
    assert_eq!(
        client.resolve(&routes::report(&TestId::from("t-1"))),
        "http://dash.local:8000/api/results/t-1/report"
    );
}

#[test]
fn production_client_requires_absolute_http_url() {
    for raw in ["", "dash.local:8000", "ftp://dash.local", "http://"] {
        let err = DashboardClient::with_timeout(raw, Duration::from_secs(1))
            .err()
            .unwrap_or_else(|| panic!("accepted '{raw}'"));
        assert!(matches!(err, ApiError::InvalidServerUrl(_)), "{err}");
    }
    assert!(DashboardClient::with_timeout("https://dash.local/", Duration::from_secs(1)).is_ok());
}
