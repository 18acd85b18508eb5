use std::{
    io::{self, BufRead},
    path::PathBuf,
    thread,
};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::DashboardCommand,
    controller::{events::UiEvent, orchestration::dispatch_dashboard_command},
    ui::{
        input::{parse_line, ConsoleInput, HELP},
        render::render_event,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Operator console for the load-testing backend")]
struct Args {
    /// Settings file; missing file means defaults.
    #[arg(long, default_value = config::DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Backend base URL, overrides the settings file and environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config)
        .with_context(|| format!("failed to load settings from '{}'", args.config.display()))?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::channel::<DashboardCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let runtime = backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || {
            println!("{HELP}");
            let mut status = String::new();
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                match parse_line(&line) {
                    Ok(ConsoleInput::Command(DashboardCommand::Shutdown)) => break,
                    Ok(ConsoleInput::Command(cmd)) => {
                        dispatch_dashboard_command(&cmd_tx, cmd, &mut status);
                        if !status.is_empty() {
                            eprintln!("{}", std::mem::take(&mut status));
                        }
                    }
                    Ok(ConsoleInput::Help) => println!("{HELP}"),
                    Ok(ConsoleInput::Nothing) => {}
                    Err(err) => eprintln!("{err}"),
                }
            }
            dispatch_dashboard_command(&cmd_tx, DashboardCommand::Shutdown, &mut status);
        })
        .context("failed to start console input thread")?;

    // Ends once the runtime drops its event sender.
    for event in ui_rx {
        if let Some(text) = render_event(&event) {
            match event {
                UiEvent::Alert(_) => eprintln!("{text}"),
                _ => println!("{text}"),
            }
        }
    }

    match runtime.join() {
        Ok(result) => result,
        Err(_) => anyhow::bail!("dashboard runtime panicked"),
    }
}
