// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;

use ompsync::config::Config;
use ompsync::gitlab::GitlabClient;
use ompsync::sync::SyncManager;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting ompsync");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: group={} argocd_namespace={}",
        config.gitlab_group, config.argocd_namespace
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let gitlab = GitlabClient::new(config.gitlab_url.clone(), config.gitlab_token.clone());
    let manager = SyncManager::new(client, gitlab, config);

    // One pass per invocation; the scheduler that launches this process
    // provides convergence over time. Per-item failures are logged and
    // retried by the next run, only fatal errors exit non-zero. The run
    // summary is logged by the manager itself.
    manager.run().await?;

    Ok(())
}
