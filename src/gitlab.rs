// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GitLab group project listing.
//!
//! The listing must be complete before reconciliation starts: a partial
//! view would misclassify existing projects as missing. Any HTTP or
//! decode failure therefore aborts the whole run.

use crate::constants::gitlab::PER_PAGE;
use crate::error::{Result, SyncError};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

/// One project as returned by the group listing, reduced to the fields
/// reconciliation consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProject {
    pub id: u64,
    pub clone_url: String,
}

/// Wire shape of a project in the GitLab group listing
#[derive(Deserialize)]
struct GroupProject {
    id: u64,
    ssh_url_to_repo: String,
}

impl From<GroupProject> for ExternalProject {
    fn from(p: GroupProject) -> Self {
        ExternalProject {
            id: p.id,
            clone_url: p.ssh_url_to_repo,
        }
    }
}

pub struct GitlabClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl GitlabClient {
    pub fn new(base_url: Url, token: String) -> Self {
        GitlabClient {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// List every project under a group, recursively including sub-groups.
    /// Consumes all pages before returning.
    #[instrument(skip(self))]
    pub async fn list_group_projects(&self, group: &str) -> Result<Vec<ExternalProject>> {
        let url = self.group_projects_url(group)?;
        let mut projects = Vec::new();
        let mut page: u64 = 1;

        loop {
            debug!("Fetching project listing page {}", page);
            let response = self
                .http
                .get(url.clone())
                .header("PRIVATE-TOKEN", &self.token)
                .query(&[
                    ("include_subgroups", "true".to_string()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?
                .error_for_status()?;

            let next = next_page(response.headers());
            let batch: Vec<GroupProject> = response.json().await?;
            projects.extend(batch.into_iter().map(ExternalProject::from));

            match next {
                Some(n) => page = n,
                None => break,
            }
        }

        info!("Listed {} projects in group {}", projects.len(), group);
        Ok(projects)
    }

    fn group_projects_url(&self, group: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/api/v4/groups/{group}/projects")
            .parse()
            .map_err(|e| SyncError::ListingError(format!("Invalid listing URL: {e}")))
    }
}

/// Read GitLab's pagination header. Absent or empty means the last page.
fn next_page(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("x-next-page")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}
