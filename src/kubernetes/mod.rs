// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access: Application listing/creation and the shared
//! repository ConfigMap.

pub mod applications;
pub mod repositories;

pub use applications::{create_application, list_application_names, CreateOutcome};
pub use repositories::{RepositorySnapshot, RepositoryStore, StoreOutcome};
