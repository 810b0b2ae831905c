// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deactivates users that lost their OAuth2 authorization
#[derive(Debug, clap::Parser)]
#[command(name = crate::BINARY_NAME, version = crate::VERSION)]
pub struct Cli {
    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the YAML config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Runs authorization sweeps periodically until interrupted
    Run,

    /// Runs a single authorization sweep and prints its summary
    Sweep,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
