// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Process configuration loaded once at startup from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GitLab instance to list projects from
    pub gitlab_url: Url,
    /// Personal access token used to authenticate listing calls
    pub gitlab_token: String,
    /// GitLab group whose projects (including sub-groups) are reconciled
    pub gitlab_group: String,
    /// Namespace holding the Argo CD Applications and the argocd-cm ConfigMap
    pub argocd_namespace: String,
    /// Namespace each created Application deploys into
    pub destination_namespace: String,
    /// Secret referenced by every registered repository credential
    pub ssh_secret_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Missing required values are fatal startup errors.
    pub fn from_env() -> Result<Self> {
        let gitlab_url: Url = env::var("GITLAB_API_URL")
            .context("GITLAB_API_URL environment variable not set")?
            .parse()
            .context("GITLAB_API_URL is not a valid URL")?;
        let gitlab_token = env::var("GITLAB_PERSONAL_ACCESS_TOKEN")
            .context("GITLAB_PERSONAL_ACCESS_TOKEN environment variable not set")?;
        let gitlab_group = env::var("RESIDENCIES_PARENT_REPOSITORIES_ID")
            .context("RESIDENCIES_PARENT_REPOSITORIES_ID environment variable not set")?;

        let argocd_namespace =
            env::var("ARGOCD_NAMESPACE").unwrap_or_else(|_| defaults::ARGOCD_NAMESPACE.to_string());
        let destination_namespace = env::var("DESTINATION_NAMESPACE")
            .unwrap_or_else(|_| defaults::DESTINATION_NAMESPACE.to_string());
        let ssh_secret_name =
            env::var("REPO_SSH_SECRET_NAME").unwrap_or_else(|_| defaults::SSH_SECRET_NAME.to_string());

        Ok(Config {
            gitlab_url,
            gitlab_token,
            gitlab_group,
            argocd_namespace,
            destination_namespace,
            ssh_secret_name,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests, no environment access
    pub fn for_tests() -> Self {
        Config {
            gitlab_url: "https://gitlab.example.com".parse().unwrap(),
            gitlab_token: "test-token".to_string(),
            gitlab_group: "1234".to_string(),
            argocd_namespace: defaults::ARGOCD_NAMESPACE.to_string(),
            destination_namespace: defaults::DESTINATION_NAMESPACE.to_string(),
            ssh_secret_name: defaults::SSH_SECRET_NAME.to_string(),
        }
    }
}
