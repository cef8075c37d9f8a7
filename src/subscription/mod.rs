// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Refresh subscriptions.
//!
//! Consumers register callbacks to be told when a refresh cycle completes;
//! the polling scheduler only fetches while at least one subscriber is
//! registered, so an idle library costs the device nothing.

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
