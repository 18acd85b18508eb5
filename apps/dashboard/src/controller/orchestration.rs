//! Command orchestration helpers from operator input to the runtime queue.

use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::backend_bridge::commands::DashboardCommand;

pub fn dispatch_dashboard_command(
    cmd_tx: &Sender<DashboardCommand>,
    cmd: DashboardCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued console->runtime command"),
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
        }
        Err(TrySendError::Closed(_)) => {
            *status = "Dashboard runtime stopped; restart the dashboard".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn reports_full_and_closed_queues_in_status() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut status = String::new();

        dispatch_dashboard_command(&tx, DashboardCommand::SubmitJob, &mut status);
        assert!(status.is_empty());

        dispatch_dashboard_command(&tx, DashboardCommand::StopAllJobs, &mut status);
        assert_eq!(status, "Command queue is full; please retry");
        assert_eq!(rx.try_recv().ok(), Some(DashboardCommand::SubmitJob));

        drop(rx);
        dispatch_dashboard_command(&tx, DashboardCommand::SaveConfig, &mut status);
        assert_eq!(status, "Dashboard runtime stopped; restart the dashboard");
    }
}
