use std::time::Duration;

use super::*;
use crate::controller::fake_api::{dashboard, FakeApi, Reply};

fn values(options: &[SelectOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn project_list_starts_with_hidden_placeholder_in_document_order() {
    let (dash, _rx) = dashboard(FakeApi::new());

    dash.selector.load_projects().await;

    let projects = dash.selector.projects().await;
    assert_eq!(values(&projects), ["", "p1", "p0"]);
    assert!(projects[0].hidden);
    assert_eq!(projects[0].label, PROJECT_PLACEHOLDER);
    assert_eq!(projects[1].label, "Project One");
    assert!(dash.selector.scenarios().await.is_empty());
    assert_eq!(dash.selector.selection().await, (None, None));
}

#[tokio::test(start_paused = true)]
async fn selecting_project_lists_scenarios_in_order_and_picks_first() {
    let (dash, rx) = dashboard(FakeApi::new());

    dash.selector.select_project(ProjectId::from("p1")).await;

    let scenarios = dash.selector.scenarios().await;
    let labels: Vec<&str> = scenarios.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "smoke (5 users, 30s)",
            "custom (stages in config.json)",
            "load (100 users, 5m)",
        ]
    );
    assert_eq!(
        dash.selector.selection().await,
        (Some(ProjectId::from("p1")), Some(ScenarioId::from("smoke")))
    );
    assert!(rx
        .try_iter()
        .any(|event| event == UiEvent::ScenariosUpdated(scenarios.clone())));
}

#[tokio::test(start_paused = true)]
async fn missing_scenario_fields_fall_back_to_defaults() {
    let api = FakeApi::new();
    api.config.set(Reply::Ok(serde_json::json!({
        "projects_configs": {
            "p2": {"name": "Two", "scenarios": {"bare": {}}}
        }
    })));
    let (dash, _rx) = dashboard(api);

    dash.selector.select_project(ProjectId::from("p2")).await;

    let scenarios = dash.selector.scenarios().await;
    assert_eq!(scenarios[0].label, "bare (1 users, 10s)");
}

#[tokio::test(start_paused = true)]
async fn unknown_or_empty_project_keeps_previous_scenarios() {
    let (dash, _rx) = dashboard(FakeApi::new());
    dash.selector.select_project(ProjectId::from("p1")).await;
    let before = dash.selector.scenarios().await;

    dash.selector.select_project(ProjectId::from("nope")).await;
    assert_eq!(dash.selector.scenarios().await, before);

    dash.selector.select_project(ProjectId::from("p0")).await;
    assert_eq!(dash.selector.scenarios().await, before);
    assert_eq!(dash.selector.selection().await.0, Some(ProjectId::from("p0")));
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_is_silent() {
    let api = FakeApi::new();
    api.config.set(Reply::Status(500, "boom".to_string()));
    let (dash, rx) = dashboard(api);

    dash.selector.load_projects().await;
    dash.selector.select_project(ProjectId::from("p1")).await;

    assert!(dash.selector.projects().await.is_empty());
    assert!(dash.selector.scenarios().await.is_empty());
    assert_eq!(rx.try_iter().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_answer_for_earlier_project_does_not_override_later_selection() {
    let api = FakeApi::new();
    api.config.push(
        Duration::from_millis(150),
        Reply::Ok(serde_json::json!({
            "projects_configs": {
                "a": {"name": "A", "scenarios": {"slow": {"users": 1, "run_time": "1m"}}},
                "b": {"name": "B", "scenarios": {"fast": {"users": 2, "run_time": "2m"}}}
            }
        })),
    );
    let (dash, _rx) = dashboard(api);

    tokio::join!(dash.selector.select_project(ProjectId::from("a")), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        dash.selector.select_project(ProjectId::from("p1")).await;
    });

    assert_eq!(
        dash.selector.selection().await,
        (Some(ProjectId::from("p1")), Some(ScenarioId::from("smoke")))
    );
    assert_eq!(values(&dash.selector.scenarios().await), ["smoke", "custom", "load"]);
}

#[tokio::test(start_paused = true)]
async fn only_offered_scenarios_can_be_selected() {
    let (dash, _rx) = dashboard(FakeApi::new());
    dash.selector.select_project(ProjectId::from("p1")).await;

    assert!(dash.selector.select_scenario(ScenarioId::from("custom")).await);
    assert!(!dash.selector.select_scenario(ScenarioId::from("ghost")).await);
    assert_eq!(
        dash.selector.selection().await.1,
        Some(ScenarioId::from("custom"))
    );
}
