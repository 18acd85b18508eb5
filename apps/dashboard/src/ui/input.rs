use std::path::PathBuf;

use crate::backend_bridge::commands::DashboardCommand;

pub const HELP: &str = "\
commands:
  project <id>            select a project (repopulates scenarios)
  scenario <id>           select a scenario of the selected project
  token <value>           set the auth token sent with new tests
  in-web on|off           start tests with the live web panel
  start                   start a test with the current form
  reload                  reload active tests
  completed               reload completed tests
  stop <test_id>          stop one test
  stop-all                stop and remove all active tests
  cleanup                 clean up stale execution containers
  edit on|off             toggle the configuration editor (on loads it)
  load-config             load the current configuration into the buffer
  config-export <path>    write the configuration buffer to a file
  config-import <path>    replace the configuration buffer with a file
  save-config             save the configuration buffer
  projects                reload the project list
  ack                     acknowledge pending alerts
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(DashboardCommand),
    Help,
    Nothing,
}

pub fn parse_line(line: &str) -> Result<ConsoleInput, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleInput::Nothing);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let cmd = match verb {
        "help" | "?" => return Ok(ConsoleInput::Help),
        "project" => DashboardCommand::SelectProject {
            project: required(verb, rest)?.into(),
        },
        "scenario" => DashboardCommand::SelectScenario {
            scenario: required(verb, rest)?.into(),
        },
        "token" => DashboardCommand::SetAuthToken {
            auth_token: rest.to_string(),
        },
        "in-web" => DashboardCommand::SetInWeb {
            in_web: on_off(verb, rest)?,
        },
        "start" => DashboardCommand::SubmitJob,
        "reload" => DashboardCommand::ReloadActiveJobs,
        "completed" => DashboardCommand::ReloadCompletedJobs,
        "stop" => DashboardCommand::StopJob {
            test_id: required(verb, rest)?.into(),
        },
        "stop-all" => DashboardCommand::StopAllJobs,
        "cleanup" => DashboardCommand::CleanupContainers,
        "edit" => DashboardCommand::ToggleConfigEditor {
            editing: on_off(verb, rest)?,
        },
        "load-config" => DashboardCommand::LoadConfig,
        "config-export" => DashboardCommand::ExportConfigBuffer {
            path: PathBuf::from(required(verb, rest)?),
        },
        "config-import" => DashboardCommand::ImportConfigBuffer {
            path: PathBuf::from(required(verb, rest)?),
        },
        "save-config" => DashboardCommand::SaveConfig,
        "projects" => DashboardCommand::ReloadProjects,
        "ack" => DashboardCommand::AcknowledgeAlerts,
        "quit" | "exit" => DashboardCommand::Shutdown,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(ConsoleInput::Command(cmd))
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{verb}' needs an argument"))
    } else {
        Ok(rest)
    }
}

fn on_off(verb: &str, rest: &str) -> Result<bool, String> {
    match rest {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        _ => Err(format!("'{verb}' expects on or off")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_line("  stop p1__smoke-20240101120000 "),
            Ok(ConsoleInput::Command(DashboardCommand::StopJob {
                test_id: "p1__smoke-20240101120000".into()
            }))
        );
        assert_eq!(
            parse_line("in-web on"),
            Ok(ConsoleInput::Command(DashboardCommand::SetInWeb { in_web: true }))
        );
        assert_eq!(
            parse_line("token"),
            Ok(ConsoleInput::Command(DashboardCommand::SetAuthToken {
                auth_token: String::new()
            }))
        );
        assert_eq!(parse_line(""), Ok(ConsoleInput::Nothing));
    }

    #[test]
    fn rejects_missing_arguments_and_unknown_verbs() {
        assert_eq!(
            parse_line("project"),
            Err("'project' needs an argument".to_string())
        );
        assert_eq!(
            parse_line("edit maybe"),
            Err("'edit' expects on or off".to_string())
        );
        assert!(parse_line("launch").is_err());
    }
}
