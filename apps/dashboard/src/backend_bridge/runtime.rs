//! Runtime bridge between the console command queue and the dashboard.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{DashboardApi, DashboardClient};
use crossbeam_channel::Sender;
use tokio::sync::mpsc::Receiver;

use crate::{
    backend_bridge::commands::DashboardCommand,
    config::Settings,
    controller::{
        dashboard::{Dashboard, DashboardTimings},
        events::{EventSink, UiEvent},
    },
};

/// Runs the dashboard on its own single-threaded runtime. Handlers
/// interleave only at await points. The thread ends with an error if the
/// runtime or the HTTP client cannot be built.
pub fn launch(
    settings: Settings,
    cmd_rx: Receiver<DashboardCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<anyhow::Result<()>> {
    thread::spawn(move || {
        let events = EventSink::new(ui_tx);
        let started = build(&settings);
        let (runtime, client) = match started {
            Ok(parts) => parts,
            Err(err) => {
                tracing::error!("dashboard startup failure: {err:#}");
                events.emit(UiEvent::Status(format!("dashboard startup failure: {err:#}")));
                return Err(err);
            }
        };

        tracing::info!(server_url = client.server_url(), "dashboard runtime starting");
        let api: Arc<dyn DashboardApi> = Arc::new(client);
        runtime.block_on(run(api, DashboardTimings::from(&settings), cmd_rx, events));
        Ok(())
    })
}

fn build(settings: &Settings) -> anyhow::Result<(tokio::runtime::Runtime, DashboardClient)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    let client = DashboardClient::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to build http client")?;
    Ok((runtime, client))
}

pub async fn run(
    api: Arc<dyn DashboardApi>,
    timings: DashboardTimings,
    mut cmd_rx: Receiver<DashboardCommand>,
    events: EventSink,
) {
    let dashboard = Dashboard::new(api, timings, events.clone());
    let poller = dashboard.start();
    events.emit(UiEvent::Status("Dashboard ready".to_string()));

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == DashboardCommand::Shutdown {
            break;
        }
        let dashboard = dashboard.clone();
        tokio::spawn(async move {
            dashboard.handle(cmd).await;
        });
    }

    poller.abort();
    tracing::info!("dashboard runtime stopped");
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
