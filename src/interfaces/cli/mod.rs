pub mod args;
pub mod components;
pub mod edit_session;
pub mod notify;
pub mod pages;
pub mod router;
pub mod state;

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::domain::error::{AppError, Result};
use args::{Command, EndpointCommand, SpecCommand, TestCaseCommand};
use router::{guard, Route};
use state::ConsoleState;

pub use args::Cli;

/// `@path` reads the value from a file; anything else is taken literally.
pub(crate) fn resolve_value(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => read_file(Path::new(path)),
        None => Ok(value.to_string()),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::IoError(format!("Cannot read {}: {}", path.display(), e)))
}

pub(crate) fn resolve_all(
    assignments: Vec<(&'static str, String)>,
) -> Result<Vec<(&'static str, String)>> {
    assignments
        .into_iter()
        .map(|(field, value)| Ok((field, resolve_value(&value)?)))
        .collect()
}

/// The page a command renders, for the login guard. `None` for commands
/// that work without a session.
pub fn command_route(command: &Command) -> Option<Route> {
    let endpoint = |id: &str| Route::Endpoint {
        endpoint_id: id.to_string(),
    };
    let spec = |endpoint_id: &str, spec_id: &str| Route::Spec {
        endpoint_id: endpoint_id.to_string(),
        spec_id: spec_id.to_string(),
    };
    match command {
        Command::Login { .. } | Command::Logout | Command::Status => None,
        Command::Dashboard | Command::Translate { .. } => Some(Route::Dashboard),
        Command::Open { path } => Route::from_path(path).ok(),
        Command::Endpoint(EndpointCommand::New { .. }) => Some(Route::NewEndpoint),
        Command::Endpoint(
            EndpointCommand::Show { id }
            | EndpointCommand::Edit { id, .. }
            | EndpointCommand::Connection { id },
        ) => Some(endpoint(id)),
        Command::Spec(SpecCommand::New { endpoint, .. }) => Some(Route::NewSpec {
            endpoint_id: endpoint.clone(),
        }),
        Command::Spec(
            SpecCommand::Show { endpoint, spec: id }
            | SpecCommand::Edit {
                endpoint, spec: id, ..
            }
            | SpecCommand::Activate { endpoint, spec: id }
            | SpecCommand::Generate { endpoint, spec: id }
            | SpecCommand::RunTests { endpoint, spec: id }
            | SpecCommand::Artifact {
                endpoint, spec: id, ..
            },
        ) => Some(spec(endpoint, id)),
        Command::Testcase(
            TestCaseCommand::Show { endpoint, spec: id, .. }
            | TestCaseCommand::New { endpoint, spec: id, .. }
            | TestCaseCommand::Edit { endpoint, spec: id, .. }
            | TestCaseCommand::Delete { endpoint, spec: id, .. },
        ) => Some(spec(endpoint, id)),
    }
}

/// Runs one command. Pages that need a session see `Unauthorized` when none
/// is stored; the caller decides where that leads.
pub async fn dispatch(
    state: &ConsoleState,
    command: Command,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(requested) = command_route(&command) {
        let shown = guard(requested.clone(), state.session.is_authenticated());
        if shown != requested {
            debug!(requested = %requested, "Route guard redirect");
            return Err(AppError::Unauthorized);
        }
    }

    match command {
        Command::Login { username, password } => {
            pages::login::login(state, username, password, input, out).await
        }
        Command::Logout => pages::login::logout(state, out),
        Command::Status => pages::login::status(state, out),
        Command::Dashboard => pages::dashboard::render(state, out).await,
        Command::Open { path } => open(state, &path, out).await,
        Command::Endpoint(command) => match command {
            EndpointCommand::Show { id } => pages::endpoint_detail::show(state, &id, out).await,
            EndpointCommand::New {
                key,
                name,
                definition,
            } => pages::new_endpoint::create(state, key, name, definition, out).await,
            EndpointCommand::Edit { id, fields } => {
                let assignments = resolve_all(fields.assignments())?;
                pages::endpoint_detail::edit(state, &id, assignments, input, out).await
            }
            EndpointCommand::Connection { id } => {
                pages::endpoint_detail::connection(state, &id, out).await
            }
        },
        Command::Spec(command) => match command {
            SpecCommand::New {
                endpoint,
                name,
                version,
                rules,
            } => {
                let assignments = resolve_all(rules.assignments())?;
                pages::new_spec::create(state, &endpoint, name, version, assignments, out).await
            }
            SpecCommand::Show { endpoint, spec } => {
                pages::spec_detail::show(state, &endpoint, &spec, out).await
            }
            SpecCommand::Edit {
                endpoint,
                spec,
                name,
                version,
                rules,
            } => {
                let mut assignments = Vec::new();
                if let Some(name) = name {
                    assignments.push(("name", name));
                }
                if let Some(version) = version {
                    assignments.push(("version", version));
                }
                assignments.extend(resolve_all(rules.assignments())?);
                pages::spec_detail::edit(state, &endpoint, &spec, assignments, input, out).await
            }
            SpecCommand::Activate { endpoint, spec } => {
                pages::spec_detail::activate(state, &endpoint, &spec, out).await
            }
            SpecCommand::Generate { endpoint, spec } => {
                pages::spec_detail::generate(state, &endpoint, &spec, out).await
            }
            SpecCommand::RunTests { endpoint, spec } => {
                pages::spec_detail::run_tests(state, &endpoint, &spec, out).await
            }
            SpecCommand::Artifact {
                endpoint,
                spec,
                regenerate,
            } => pages::spec_detail::artifact(state, &endpoint, &spec, regenerate, out).await,
        },
        Command::Testcase(command) => match command {
            TestCaseCommand::Show { endpoint, spec, id } => {
                pages::test_case_drawer::show(state, &endpoint, &spec, &id, out).await
            }
            TestCaseCommand::New {
                endpoint,
                spec,
                fields,
            } => {
                let assignments = resolve_all(fields.assignments())?;
                pages::test_case_drawer::create(state, &endpoint, &spec, assignments, out).await
            }
            TestCaseCommand::Edit {
                endpoint,
                spec,
                id,
                fields,
            } => {
                let assignments = resolve_all(fields.assignments())?;
                pages::test_case_drawer::update(state, &endpoint, &spec, &id, assignments, out)
                    .await
            }
            TestCaseCommand::Delete { endpoint, spec, id } => {
                pages::test_case_drawer::delete(state, &endpoint, &spec, &id, out).await
            }
        },
        Command::Translate {
            key,
            payload,
            file,
            content_type,
        } => {
            let payload = match (payload, file) {
                (_, Some(file)) => read_file(&file)?,
                (Some(payload), None) => payload,
                (None, None) => String::new(),
            };
            pages::translation_drawer::translate(state, &key, &payload, &content_type, out).await
        }
    }
}

/// Renders the page behind a route path.
async fn open(state: &ConsoleState, path: &str, out: &mut dyn Write) -> Result<()> {
    match Route::from_path(path)? {
        Route::Login => pages::login::status(state, out),
        Route::Dashboard => pages::dashboard::render(state, out).await,
        Route::NewEndpoint => {
            writeln!(out, "Create an endpoint with: endpoint new --key KEY --name NAME")?;
            Ok(())
        }
        Route::Endpoint { endpoint_id } => {
            pages::endpoint_detail::show(state, &endpoint_id, out).await
        }
        Route::NewSpec { endpoint_id } => {
            writeln!(
                out,
                "Create a spec with: spec new {} --name NAME --version VERSION",
                endpoint_id
            )?;
            Ok(())
        }
        Route::Spec {
            endpoint_id,
            spec_id,
        } => pages::spec_detail::show(state, &endpoint_id, &spec_id, out).await,
    }
}
