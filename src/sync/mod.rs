// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation core: desired-vs-current diff, Application creation,
//! and credential registration.

pub mod manager;
pub mod reconciler;
pub mod registrar;

pub use manager::{RunSummary, SyncManager};
pub use reconciler::{diff, reconcile, ReconcileOutcome};
pub use registrar::{register_credential, Registered};
