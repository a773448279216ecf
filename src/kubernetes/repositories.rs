// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shared repository credential store backed by the argocd-cm ConfigMap.
//!
//! Every write is conditioned on the resourceVersion captured at load;
//! a concurrent writer turns the replace into a 409 which callers retry
//! with a fresh load. The blob is rewritten whole, so other consumers
//! never observe a torn document.

use crate::constants::argocd;
use crate::error::Result;
use crate::types::credentials::{parse_repositories, render_repositories, CredentialEntry};
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{api::PostParams, Api, Client};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Outcome of a conditional store. `Conflict` means the ConfigMap moved
/// under us and the read-modify-write must start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    Conflict,
}

/// One consistent read of the credential collection, pinned to the
/// resourceVersion it was taken at
pub struct RepositorySnapshot {
    config_map: ConfigMap,
    pub entries: Vec<CredentialEntry>,
}

impl RepositorySnapshot {
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Append an entry. Callers check `contains` first; the collection
    /// stays ordered and append-only.
    pub fn insert(&mut self, entry: CredentialEntry) {
        self.entries.push(entry);
    }
}

pub struct RepositoryStore {
    api: Api<ConfigMap>,
    name: String,
}

impl RepositoryStore {
    pub fn new(client: &Client, namespace: &str) -> Self {
        RepositoryStore {
            api: Api::namespaced(client.clone(), namespace),
            name: argocd::CONFIG_MAP.to_string(),
        }
    }

    /// Read and parse the current credential collection
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<RepositorySnapshot> {
        let config_map = self.api.get(&self.name).await?;
        let entries = config_map
            .data
            .as_ref()
            .and_then(|data| data.get(argocd::REPOSITORIES_KEY))
            .map(|blob| parse_repositories(blob))
            .transpose()?
            .unwrap_or_default();

        debug!("Loaded {} credential entries", entries.len());
        Ok(RepositorySnapshot { config_map, entries })
    }

    /// Write a snapshot back, conditioned on it being unchanged since load
    pub async fn store(&self, snapshot: RepositorySnapshot) -> Result<StoreOutcome> {
        let mut config_map = snapshot.config_map;
        let blob = render_repositories(&snapshot.entries)?;
        config_map
            .data
            .get_or_insert_with(BTreeMap::new)
            .insert(argocd::REPOSITORIES_KEY.to_string(), blob);

        match self
            .api
            .replace(&self.name, &PostParams::default(), &config_map)
            .await
        {
            Ok(_) => Ok(StoreOutcome::Stored),
            Err(kube::Error::Api(err)) if err.code == 409 => Ok(StoreOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }
}
