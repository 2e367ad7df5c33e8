//! Upline dashboard CLI

use std::{io, process::ExitCode};

use tracing::{error, info};

use upline::store::FileStore;
use upline_app::context::AppContext;

use crate::{
    commands::{CommandError, Env},
    config::CliConfig,
    state::{load_session, save_session},
};

mod commands;
mod config;
mod logging;
mod render;
mod state;

/// Upline CLI entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // clap renders help and version requests through the error path too
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = logging::init_subscriber(&config.logging) {
        report(&err);

        return ExitCode::FAILURE;
    }

    let context = match AppContext::from_settings(&config.app_settings()) {
        Ok(context) => context,
        Err(err) => {
            error!(error = %err, "failed to build application context");
            report(&err);

            return ExitCode::FAILURE;
        }
    };

    let mut store = FileStore::new(config.store.dir.clone());

    let mut session = match load_session(&store, config.api.token.as_deref()) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "failed to restore session");
            report(&err);

            return ExitCode::FAILURE;
        }
    };

    info!(
        store = %store.dir().display(),
        authenticated = session.is_authenticated(),
        "starting"
    );

    let mut stdout = io::stdout().lock();

    let result = commands::run(
        config.command,
        &mut Env {
            context: &context,
            session: &mut session,
            store: &mut store,
            out: &mut stdout,
        },
    )
    .await;

    // An expired token ends the session mid-command; keep the store in step.
    let persisted = if config.api.token.is_none() {
        save_session(&mut store, &session).map_err(CommandError::from)
    } else {
        Ok(())
    };

    match result.and(persisted) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            report(&err);

            ExitCode::FAILURE
        }
    }
}

fn report(err: &dyn std::error::Error) {
    #[expect(
        clippy::print_stderr,
        reason = "errors are reported to the user even when logging is filtered out"
    )]
    {
        eprintln!("error: {err}");
    }
}
