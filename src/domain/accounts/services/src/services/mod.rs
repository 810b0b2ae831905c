// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod authorization_sweeper_impl;
mod deactivate_unauthorized_users_job;
mod predefined_users_registrator;

pub use authorization_sweeper_impl::*;
pub use deactivate_unauthorized_users_job::*;
pub use predefined_users_registrator::*;
