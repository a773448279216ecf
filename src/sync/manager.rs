// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One-shot orchestration of a full sync run.
//!
//! Sequence per invocation: fetch current names, fetch the full project
//! listing, diff and create, then register credentials. The registration
//! pass covers every desired Application that exists in the cluster, so
//! an Application left without its entry by an earlier crashed or
//! conflicted run is repaired here as well.

use crate::config::Config;
use crate::error::Result;
use crate::gitlab::GitlabClient;
use crate::kubernetes::{list_application_names, RepositoryStore};
use crate::sync::reconciler::reconcile;
use crate::sync::registrar::{register_credential, Registered};
use crate::types::{desired_applications, AppDescriptor, Application};
use kube::{Api, Client};
use std::collections::BTreeSet;
use tracing::{error, info, instrument, warn};

/// Per-run counters, logged at the end of the run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub examined: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub registered: usize,
    pub already_registered: usize,
    pub registration_failed: usize,
}

pub struct SyncManager {
    client: Client,
    gitlab: GitlabClient,
    config: Config,
}

impl SyncManager {
    pub fn new(client: Client, gitlab: GitlabClient, config: Config) -> Self {
        SyncManager {
            client,
            gitlab,
            config,
        }
    }

    /// Run one full sync. Listing and current-state failures are fatal
    /// and happen before any mutation; per-item failures are counted and
    /// left to the next run.
    pub async fn run(&self) -> Result<RunSummary> {
        let current = list_application_names(&self.client, &self.config.argocd_namespace).await?;
        info!("Current applications: {:?}", current);

        let projects = self.gitlab.list_group_projects(&self.config.gitlab_group).await?;
        let desired = desired_applications(&projects);

        Ok(self.sync(desired, current).await)
    }

    /// Reconcile a desired set against a current snapshot and register
    /// credentials for everything that now exists
    #[instrument(skip(self, desired, current))]
    pub async fn sync(&self, desired: Vec<AppDescriptor>, current: BTreeSet<String>) -> RunSummary {
        let api: Api<Application> =
            Api::namespaced(self.client.clone(), &self.config.argocd_namespace);

        let outcome = reconcile(&api, &desired, &current, &self.config).await;

        let mut summary = RunSummary {
            examined: desired.len(),
            created: outcome.created.len(),
            skipped: outcome.skipped,
            failed: outcome.failed.len(),
            ..RunSummary::default()
        };

        let store = RepositoryStore::new(&self.client, &self.config.argocd_namespace);

        // One snapshot up front filters names that already carry an entry;
        // register_credential re-checks under its own read, so a stale
        // filter only costs an extra no-op pass.
        let known = match store.load().await {
            Ok(snapshot) => snapshot
                .entries
                .iter()
                .map(|e| e.name.clone())
                .collect::<BTreeSet<String>>(),
            Err(e) => {
                warn!("Could not read repository config up front: {}", e);
                BTreeSet::new()
            }
        };

        for descriptor in desired
            .iter()
            .filter(|d| !outcome.failed.contains(&d.name))
        {
            if known.contains(&descriptor.name) {
                summary.already_registered += 1;
                continue;
            }

            match register_credential(&store, descriptor, &self.config.ssh_secret_name).await {
                Ok(Registered::Added) => summary.registered += 1,
                Ok(Registered::AlreadyPresent) => summary.already_registered += 1,
                Err(e) => {
                    error!(application = %descriptor.name, "Credential registration failed: {}", e);
                    summary.registration_failed += 1;
                }
            }
        }

        info!(
            examined = summary.examined,
            created = summary.created,
            skipped = summary.skipped,
            failed = summary.failed,
            registered = summary.registered,
            already_registered = summary.already_registered,
            registration_failed = summary.registration_failed,
            "Sync run complete"
        );

        summary
    }
}
