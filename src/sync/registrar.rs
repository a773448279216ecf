// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credential registration against the shared repository store.
//!
//! Registration is a set-union on entry name under an optimistic
//! read-modify-write: reload, re-check, append, conditional replace.
//! The duplicate check runs again on every retry so a concurrent writer
//! registering the same name can never produce two entries.

use crate::constants::retry::MAX_CONFLICT_ATTEMPTS;
use crate::error::{Result, SyncError};
use crate::kubernetes::{RepositoryStore, StoreOutcome};
use crate::types::{AppDescriptor, CredentialEntry};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// A new entry was appended and written back
    Added,
    /// An entry with this name already existed; nothing was written
    AlreadyPresent,
}

/// Register the credential entry for one Application.
/// Bounded retries; exhaustion leaves the Application without its entry,
/// which the next run detects and repairs.
pub async fn register_credential(
    store: &RepositoryStore,
    descriptor: &AppDescriptor,
    secret_name: &str,
) -> Result<Registered> {
    for attempt in 1..=MAX_CONFLICT_ATTEMPTS {
        let mut snapshot = store.load().await?;

        if snapshot.contains(&descriptor.name) {
            info!(application = %descriptor.name, "Credential entry already present");
            return Ok(Registered::AlreadyPresent);
        }

        snapshot.insert(CredentialEntry::for_descriptor(descriptor, secret_name));

        match store.store(snapshot).await? {
            StoreOutcome::Stored => {
                info!(application = %descriptor.name, "Credential entry registered");
                return Ok(Registered::Added);
            }
            StoreOutcome::Conflict => {
                warn!(
                    application = %descriptor.name,
                    "Repository config changed concurrently, retrying ({}/{})",
                    attempt,
                    MAX_CONFLICT_ATTEMPTS
                );
            }
        }
    }

    Err(SyncError::ConflictRetriesExhausted {
        name: descriptor.name.clone(),
        attempts: MAX_CONFLICT_ATTEMPTS,
    })
}
