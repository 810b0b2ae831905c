// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use clap::Parser as _;

#[tokio::main]
async fn main() {
    let args = warden_cli::cli::Cli::parse();

    if let Err(err) = warden_cli::run(args).await {
        warden_cli::display_error(&err);
        std::process::exit(1);
    }
}
