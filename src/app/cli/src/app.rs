// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::CatalogBuilder;
use time_source::SystemTimeSourceDefault;
use warden_accounts_inmem::{InMemoryAssociatedAccountRepository, InMemoryUserRepository};
use warden_accounts_services::{DeactivateUnauthorizedUsersJob, PredefinedUsersRegistrator};
use warden_adapter_oauth::OAuth2ProviderClientImpl;

use crate::commands::{Command, RunCommand, SweepCommand};
use crate::{CLIError, WardenConfig, cli};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "warden";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: cli::Cli) -> Result<(), CLIError> {
    configure_logging(args.verbose);

    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        config = ?args.config,
        "Initializing {BINARY_NAME}"
    );

    let config = WardenConfig::load(args.config.as_deref())?;
    let catalog = configure_catalog(config)?.build();

    catalog
        .get_one::<PredefinedUsersRegistrator>()?
        .run_initialization()
        .await?;

    let job = catalog.get_one::<DeactivateUnauthorizedUsersJob>()?;

    let mut command: Box<dyn Command> = match args.command {
        cli::Command::Run => Box::new(RunCommand::new(job)),
        cli::Command::Sweep => Box::new(SweepCommand::new(job)),
    };

    command.run().await
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_catalog(config: WardenConfig) -> Result<CatalogBuilder, CLIError> {
    let provider_config = config.oauth2.unwrap_or_default().into_provider_config()?;
    let sweep_config = config.sweep.unwrap_or_default().into_sweep_config()?;
    let predefined_users_config = config.users.unwrap_or_default();

    tracing::debug!(
        provider_name = %provider_config.provider_name,
        token_url = %provider_config.token_url,
        user_info_url = %provider_config.user_info_url,
        interval = ?sweep_config.interval,
        predefined_users = predefined_users_config.predefined.len(),
        "Effective configuration"
    );

    let mut b = CatalogBuilder::new();

    b.add::<SystemTimeSourceDefault>();

    b.add::<InMemoryUserRepository>();
    b.add::<InMemoryAssociatedAccountRepository>();

    b.add::<OAuth2ProviderClientImpl>();

    warden_accounts_services::register_dependencies(&mut b);

    b.add_value(provider_config);
    b.add_value(sweep_config);
    b.add_value(predefined_users_config);

    Ok(b)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging(verbosity_level: u8) {
    use tracing_log::LogTracer;
    use tracing_subscriber::EnvFilter;

    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return;
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match verbosity_level {
            0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            _ => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        },
    };

    // Redirect all standard logging to tracing events
    LogTracer::init().expect("Failed to set LogTracer");

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn display_error(err: &CLIError) {
    use std::error::Error as _;

    use console::style;

    eprintln!("{}: {err}", style("Error").red().bold());

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  {} {cause}", style("caused by:").dim());
        source = cause.source();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
