// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Current-state listing and creation of Argo CD Applications

use crate::constants::LIST_PAGE_LIMIT;
use crate::error::Result;
use crate::types::Application;
use kube::{
    api::{ListParams, PostParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Outcome of a single create call. "Already exists" is convergence,
/// not an error: a concurrent run won the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// List the names of all existing Applications in the namespace.
/// Follows the continue token so the snapshot has no pagination gaps.
#[instrument(skip(client))]
pub async fn list_application_names(client: &Client, namespace: &str) -> Result<BTreeSet<String>> {
    let api: Api<Application> = Api::namespaced(client.clone(), namespace);
    let mut names = BTreeSet::new();
    let mut continue_token: Option<String> = None;

    loop {
        let mut params = ListParams::default().limit(LIST_PAGE_LIMIT);
        if let Some(token) = &continue_token {
            params = params.continue_token(token);
        }

        let page = api.list(&params).await?;
        names.extend(page.items.iter().map(|app| app.name_any()));

        match page.metadata.continue_ {
            Some(token) if !token.is_empty() => continue_token = Some(token),
            _ => break,
        }
    }

    debug!("Found {} existing applications", names.len());
    Ok(names)
}

/// Create one Application, mapping the API server's 409 to `AlreadyExists`
pub async fn create_application(
    api: &Api<Application>,
    application: &Application,
) -> Result<CreateOutcome> {
    match api.create(&PostParams::default(), application).await {
        Ok(_) => Ok(CreateOutcome::Created),
        Err(kube::Error::Api(err)) if err.code == 409 => Ok(CreateOutcome::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}
