// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Repository credential entries stored in the shared argocd-cm ConfigMap.
//!
//! In memory the collection is always a structured `Vec<CredentialEntry>`;
//! the YAML text form exists only at the ConfigMap boundary. This keeps
//! uniqueness checks on names instead of raw text and guarantees every
//! written blob is a complete, well-formed document.

use crate::constants::argocd;
use crate::error::Result;
use crate::types::application::AppDescriptor;
use serde::{Deserialize, Serialize};

/// One repository credential as Argo CD's parser expects it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    pub name: String,
    pub ssh_private_key_secret: SshPrivateKeySecret,
    #[serde(rename = "type")]
    pub repo_type: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SshPrivateKeySecret {
    pub key: String,
    pub name: String,
}

impl CredentialEntry {
    /// Build the entry registered alongside a newly created Application
    pub fn for_descriptor(descriptor: &AppDescriptor, secret_name: &str) -> Self {
        CredentialEntry {
            name: descriptor.name.clone(),
            ssh_private_key_secret: SshPrivateKeySecret {
                key: argocd::SSH_KEY_FIELD.to_string(),
                name: secret_name.to_string(),
            },
            repo_type: argocd::REPO_TYPE.to_string(),
            url: descriptor.repo_url.clone(),
        }
    }
}

/// Parse the repositories blob into structured entries.
/// An empty or whitespace-only blob is an empty set, not an error.
pub fn parse_repositories(blob: &str) -> Result<Vec<CredentialEntry>> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(blob)?)
}

/// Serialize entries back to the blob form consumed by Argo CD
pub fn render_repositories(entries: &[CredentialEntry]) -> Result<String> {
    Ok(serde_yaml::to_string(entries)?)
}
