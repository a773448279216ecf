// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed descriptors constructed at the API boundaries.

pub mod application;
pub mod credentials;

pub use application::{application_name, desired_applications, AppDescriptor, Application};
pub use credentials::{parse_repositories, render_repositories, CredentialEntry};
