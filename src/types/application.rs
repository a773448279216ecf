// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::config::Config;
use crate::constants::{argocd, APP_NAME_PREFIX};
use crate::gitlab::ExternalProject;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Argo CD Application custom resource, restricted to the fields this
/// syncer produces. Created once per project, never mutated afterwards.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "argoproj.io", version = "v1alpha1", kind = "Application")]
#[kube(namespaced)]
pub struct ApplicationSpec {
    pub destination: Destination,
    pub source: Source,
    pub project: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
pub struct Destination {
    pub namespace: String,
    pub server: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub path: String,
    // Argo CD uses non-standard casing on the wire
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    pub target_revision: String,
}

/// Desired-state descriptor for one Application: the derived name plus the
/// repository it should deploy from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub name: String,
    pub repo_url: String,
}

impl AppDescriptor {
    pub fn for_project(project: &ExternalProject) -> Self {
        AppDescriptor {
            name: application_name(project.id),
            repo_url: project.clone_url.clone(),
        }
    }

    /// Render the full Application resource for this descriptor
    pub fn to_application(&self, config: &Config) -> Application {
        Application::new(
            &self.name,
            ApplicationSpec {
                destination: Destination {
                    namespace: config.destination_namespace.clone(),
                    server: argocd::DESTINATION_SERVER.to_string(),
                },
                source: Source {
                    path: argocd::SOURCE_PATH.to_string(),
                    repo_url: self.repo_url.clone(),
                    target_revision: argocd::TARGET_REVISION.to_string(),
                },
                project: argocd::DEFAULT_PROJECT.to_string(),
            },
        )
    }
}

/// Derive the Application name for a project id
pub fn application_name(id: u64) -> String {
    format!("{APP_NAME_PREFIX}{id}")
}

/// Build the desired Application set from the full project listing
pub fn desired_applications(projects: &[ExternalProject]) -> Vec<AppDescriptor> {
    projects.iter().map(AppDescriptor::for_project).collect()
}
