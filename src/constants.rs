// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Prefix joined with the GitLab project id to form the Application name.
/// This derivation is the join key between desired and current state and
/// must stay stable across runs.
pub const APP_NAME_PREFIX: &str = "omp-";

/// Argo CD wire-level strings. These must match the schema the Argo CD
/// controller registered with the API server exactly.
pub mod argocd {
    /// Name of the shared ConfigMap holding repository credentials
    pub const CONFIG_MAP: &str = "argocd-cm";
    /// Key inside the ConfigMap carrying the serialized credential entries
    pub const REPOSITORIES_KEY: &str = "repositories";
    /// In-cluster API server address used as the Application destination
    pub const DESTINATION_SERVER: &str = "https://kubernetes.default.svc";
    /// Path within each repository that Argo CD renders
    pub const SOURCE_PATH: &str = "objects/ocp-init";
    /// Revision tracked for every Application
    pub const TARGET_REVISION: &str = "HEAD";
    /// Argo CD project every Application is placed in
    pub const DEFAULT_PROJECT: &str = "default";
    /// Key within the SSH secret holding the private key material
    pub const SSH_KEY_FIELD: &str = "sshPrivateKey";
    /// Repository type recorded in each credential entry
    pub const REPO_TYPE: &str = "git";
}

/// Defaults for optional configuration values
pub mod defaults {
    /// Namespace the Argo CD Applications and argocd-cm live in
    pub const ARGOCD_NAMESPACE: &str = "argo-cd";
    /// Namespace each Application deploys into
    pub const DESTINATION_NAMESPACE: &str = "anarchy-operator";
    /// Secret referenced by every repository credential entry
    pub const SSH_SECRET_NAME: &str = "argocd-ssh-key";
}

/// GitLab listing configuration
pub mod gitlab {
    /// Page size for group project listings
    pub const PER_PAGE: u32 = 100;
}

/// Retry configuration for the shared ConfigMap read-modify-write
pub mod retry {
    /// Attempts before a conflicting credential registration is given up
    /// for this run and left to the next one
    pub const MAX_CONFLICT_ATTEMPTS: u32 = 5;
}

/// Page size for Application list calls against the cluster
pub const LIST_PAGE_LIMIT: u32 = 500;
