// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod associated_account;
mod oauth2_credentials;
mod oauth2_provider_config;
mod predefined_users_config;
mod sweep_config;
mod user;

pub use associated_account::*;
pub use oauth2_credentials::*;
pub use oauth2_provider_config::*;
pub use predefined_users_config::*;
pub use sweep_config::*;
pub use user::*;
