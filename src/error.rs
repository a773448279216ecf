// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("GitLab request failed: {0}")]
    GitlabError(#[from] reqwest::Error),

    #[error("Project listing failed: {0}")]
    ListingError(String),

    #[error("Malformed repositories config: {0}")]
    MalformedRepositories(#[from] serde_yaml::Error),

    #[error("Credential update for {name} still conflicted after {attempts} attempts")]
    ConflictRetriesExhausted { name: String, attempts: u32 },
}

pub type Result<T> = std::result::Result<T, SyncError>;
