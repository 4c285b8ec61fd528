//! Pipeline configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{default_request_timeout, default_worker_limit, MAX_BATCH_LEN};

/// Runtime limits for one `Pipeline`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Largest accepted batch
    pub max_batch_len: usize,

    /// Model invocations allowed to run at once, process-wide
    pub worker_limit: usize,

    /// Deadline for one batch; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_batch_len: MAX_BATCH_LEN,
            worker_limit: default_worker_limit(),
            request_timeout: Some(default_request_timeout()),
        }
    }
}

impl PipelineConfig {
    pub fn with_worker_limit(mut self, worker_limit: usize) -> Self {
        self.worker_limit = worker_limit.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_batch_len(mut self, max_batch_len: usize) -> Self {
        self.max_batch_len = max_batch_len;
        self
    }
}
