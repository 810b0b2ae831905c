// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Identifier of a user in the host identity system.
///
/// Positive identifiers belong to human users, the rest are reserved for
/// system and bot actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserID(i64);

impl UserID {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    pub const fn is_human(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for UserID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const SYSTEM_USER_ID: UserID = UserID::new(-1);
pub const SYSTEM_USERNAME: &str = "system";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub username: String,
    pub active: bool,
    /// Who flipped `active` to false, if anyone
    pub deactivated_by: Option<UserID>,
}

impl User {
    pub fn new(id: UserID, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            active: true,
            deactivated_by: None,
        }
    }

    pub fn is_human(&self) -> bool {
        self.id.is_human()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The party a state change is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserID,
    pub username: String,
}

impl Actor {
    pub fn system() -> Self {
        Self {
            id: SYSTEM_USER_ID,
            username: SYSTEM_USERNAME.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
