// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! inn-registry: the process-wide Integration Registry (spec §4.2).
//!
//! Reads must not block each other; registration serializes. An
//! `RwLock<IndexMap<..>>` gives both for free — readers proceed
//! concurrently, a writer takes exclusive access only for the instant it
//! takes to insert a clone of the registering `Integration`. No ordering
//! across unrelated registrations is promised or needed.

use inn_core::{ActionDefinition, Integration};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Snapshot summary returned by [`IntegrationRegistry::list_integrations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationSummary {
    pub name: String,
    pub description: String,
    pub action_count: usize,
}

#[derive(Clone, Default)]
pub struct IntegrationRegistry {
    inner: Arc<RwLock<IndexMap<String, Integration>>>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent replace-by-name (spec §4.2).
    pub fn register(&self, integration: Integration) {
        self.inner.write().insert(integration.name.clone(), integration);
    }

    pub fn get_action(&self, integration_name: &str, action_name: &str) -> Option<ActionDefinition> {
        self.inner
            .read()
            .get(integration_name)
            .and_then(|i| i.actions.get(action_name))
            .cloned()
    }

    pub fn get_integration(&self, integration_name: &str) -> Option<Integration> {
        self.inner.read().get(integration_name).cloned()
    }

    pub fn list_integrations(&self) -> Vec<IntegrationSummary> {
        self.inner
            .read()
            .values()
            .map(|i| IntegrationSummary {
                name: i.name.clone(),
                description: i.description.clone(),
                action_count: i.actions.len(),
            })
            .collect()
    }

    /// Empty if the integration isn't registered (spec §4.2).
    pub fn list_actions(&self, integration_name: &str) -> Vec<ActionDefinition> {
        self.inner
            .read()
            .get(integration_name)
            .map(|i| i.actions.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
