// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Pipeline Directory (spec §6): a read-only collection of known
//! pipelines. The spec leaves its storage implementation-defined (static
//! array, database table, configuration file); the Event Consumer and
//! sync ingress only depend on the `list_pipelines` interface.

use async_trait::async_trait;
use inn_core::Pipeline;

/// Read-only collaborator exposing the set of known pipelines.
#[async_trait]
pub trait PipelineDirectory: Send + Sync {
    async fn list_pipelines(&self) -> Vec<Pipeline>;
}

/// A directory backed by a fixed, in-memory snapshot of pipelines — the
/// "static array" option spec §9's open question leaves available to the
/// implementer.
#[derive(Clone, Default)]
pub struct StaticPipelineDirectory {
    pipelines: Vec<Pipeline>,
}

impl StaticPipelineDirectory {
    pub fn new(pipelines: Vec<Pipeline>) -> Self {
        Self { pipelines }
    }
}

#[async_trait]
impl PipelineDirectory for StaticPipelineDirectory {
    async fn list_pipelines(&self) -> Vec<Pipeline> {
        self.pipelines.clone()
    }
}
