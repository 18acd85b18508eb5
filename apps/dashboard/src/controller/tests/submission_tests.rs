use shared::{
    domain::{ProjectId, ScenarioId, TestId},
    protocol::StartTestResponse,
};

use super::*;
use crate::controller::fake_api::{dashboard, shown_messages, Call, FakeApi, Reply};

fn response(status: StartOutcome) -> StartTestResponse {
    StartTestResponse {
        status,
        test_id: TestId::from("p1__smoke-20240101120000"),
        web_url: None,
    }
}

#[tokio::test]
async fn started_run_is_announced_and_active_list_refreshed() {
    let api = FakeApi::new();
    let (dash, rx) = dashboard(Arc::clone(&api));
    dash.selector.select_project(ProjectId::from("p1")).await;
    dash.selector.select_scenario(ScenarioId::from("load")).await;
    dash.submission.set_auth_token("secret".to_string()).await;
    dash.submission.set_in_web(true).await;

    dash.submission.submit().await;

    assert_eq!(
        api.calls()[1..],
        [
            Call::StartTest(StartTestRequest {
                project: ProjectId::from("p1"),
                scenario: ScenarioId::from("load"),
                auth_token: "secret".to_string(),
                in_web: true,
            }),
            Call::ActiveTests,
        ]
    );
    assert_eq!(
        shown_messages(&rx),
        vec![
            "Test is being prepared...".to_string(),
            "Test started p1__smoke-20240101120000!".to_string(),
        ]
    );
}

#[tokio::test]
async fn backend_outcomes_map_to_messages() {
    let api = FakeApi::new();
    let (dash, rx) = dashboard(Arc::clone(&api));
    dash.selector.select_project(ProjectId::from("p1")).await;

    api.start.set(Reply::Ok(response(StartOutcome::Running)));
    dash.submission.submit().await;
    api.start
        .set(Reply::Ok(response(StartOutcome::Other("queued".to_string()))));
    dash.submission.submit().await;
    api.start.set(Reply::Status(409, "conflict".to_string()));
    dash.submission.submit().await;

    let messages = shown_messages(&rx);
    assert_eq!(
        messages,
        vec![
            "Test is being prepared...".to_string(),
            "Test is running p1__smoke-20240101120000!".to_string(),
            "Test is being prepared...".to_string(),
            "Error: unexpected status queued!".to_string(),
            "Test is being prepared...".to_string(),
            "Error: 409!".to_string(),
        ]
    );
    assert_eq!(api.count(&Call::ActiveTests), 3);
}

#[tokio::test]
async fn transport_failure_still_refreshes_active_list() {
    let api = FakeApi::new();
    api.start.set(Reply::Transport);
    let (dash, rx) = dashboard(Arc::clone(&api));
    dash.selector.select_project(ProjectId::from("p1")).await;

    dash.submission.submit().await;

    let messages = shown_messages(&rx);
    assert!(messages[1].starts_with("Network error: "), "{}", messages[1]);
    assert_eq!(api.calls().last(), Some(&Call::ActiveTests));
    assert_eq!(
        dash.notifications.current().await.map(|n| n.kind),
        Some(NotifyKind::Error)
    );
}

#[tokio::test]
async fn missing_selection_never_reaches_backend() {
    let api = FakeApi::new();
    let (dash, rx) = dashboard(Arc::clone(&api));

    dash.submission.submit().await;

    assert!(api.calls().is_empty());
    assert_eq!(
        shown_messages(&rx),
        vec!["Select a project and scenario first".to_string()]
    );
}

#[tokio::test]
async fn form_defaults_to_empty_token_outside_web_mode() {
    let (dash, _rx) = dashboard(FakeApi::new());

    assert_eq!(dash.submission.form().await, JobForm::default());
    assert!(!dash.submission.form().await.in_web);
}
