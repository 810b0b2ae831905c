// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use internal_error::{BoxedError, InternalError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum CLIError {
    #[error("{msg}")]
    UsageError { msg: String },

    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    #[error(transparent)]
    CriticalFailure(BoxedError),
}

impl CLIError {
    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::UsageError { msg: msg.into() }
    }

    pub fn config_error(path: impl Into<PathBuf>, e: impl Into<BoxedError>) -> Self {
        Self::Config {
            path: path.into(),
            source: e.into(),
        }
    }

    pub fn critical(e: impl Into<BoxedError>) -> Self {
        Self::CriticalFailure(e.into())
    }
}

impl From<InternalError> for CLIError {
    fn from(e: InternalError) -> Self {
        Self::critical(e)
    }
}

impl From<dill::InjectionError> for CLIError {
    fn from(e: dill::InjectionError) -> Self {
        Self::critical(e)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
