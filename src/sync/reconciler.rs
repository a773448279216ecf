// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired-vs-current diffing and Application creation.
//!
//! This is a set difference on names, not a reconcile-to-spec: presence
//! of a name suppresses all action, content is never compared. The only
//! mutable spec field (the repo URL) is stable for the lifetime of a
//! project id.

use crate::config::Config;
use crate::kubernetes::{create_application, CreateOutcome};
use crate::types::{AppDescriptor, Application};
use kube::Api;
use std::collections::BTreeSet;
use tracing::{error, info};

/// Result of one reconciliation pass. `failed` holds names whose create
/// call errored; they are retried by the next run, not this one.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub created: Vec<AppDescriptor>,
    pub skipped: usize,
    pub failed: Vec<String>,
}

/// Pure set difference: desired descriptors whose name is absent from current
pub fn diff<'a>(
    desired: &'a [AppDescriptor],
    current: &BTreeSet<String>,
) -> Vec<&'a AppDescriptor> {
    desired.iter().filter(|d| !current.contains(&d.name)).collect()
}

/// Create every missing Application. One failing item is logged and
/// skipped; the rest of the run continues.
pub async fn reconcile(
    api: &Api<Application>,
    desired: &[AppDescriptor],
    current: &BTreeSet<String>,
    config: &Config,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for descriptor in desired {
        info!(application = %descriptor.name, "Checking application");

        if current.contains(&descriptor.name) {
            info!(application = %descriptor.name, "Application exists, skipping");
            outcome.skipped += 1;
            continue;
        }

        match create_application(api, &descriptor.to_application(config)).await {
            Ok(CreateOutcome::Created) => {
                info!(application = %descriptor.name, "Application created");
                outcome.created.push(descriptor.clone());
            }
            Ok(CreateOutcome::AlreadyExists) => {
                // Lost the race to a concurrent run: converged, not an error
                info!(application = %descriptor.name, "Application created concurrently, skipping");
                outcome.skipped += 1;
            }
            Err(e) => {
                error!(application = %descriptor.name, "Failed to create application: {}", e);
                outcome.failed.push(descriptor.name.clone());
            }
        }
    }

    outcome
}
