//! Orchestrator
//!
//! Validating → FanningOut → Aggregating → Done, with Failed reachable from
//! every working state. Readings are processed one at a time in batch
//! order; the first failure aborts the whole batch.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::error::{PipelineError, PipelineResult, ShapeError};
use crate::logic::health::{analyze, HealthInputs};
use crate::logic::model::ModelRegistry;

use super::aggregate::aggregate_predictions;
use super::config::PipelineConfig;
use super::fanout::FanOutExecutor;
use super::modes::extract_modes;
use super::types::{Batch, BatchResult};

// ============================================================================
// STATE MACHINE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Validating,
    FanningOut,
    Aggregating,
    Done,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Validating => "validating",
            PipelineState::FanningOut => "fanning_out",
            PipelineState::Aggregating => "aggregating",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Validating, FanningOut)
                | (FanningOut, Aggregating)
                | (Aggregating, Done)
                | (Validating, Failed)
                | (FanningOut, Failed)
                | (Aggregating, Failed)
        )
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current state of one run, logged on every move
struct Run {
    state: PipelineState,
}

impl Run {
    fn start() -> Self {
        Self { state: PipelineState::Validating }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid pipeline transition {} -> {}",
            self.state,
            next
        );
        log::debug!("Pipeline {} -> {}", self.state, next);
        self.state = next;
    }

    /// Move to Failed and hand the error back
    fn fail(&mut self, err: PipelineError) -> PipelineError {
        self.advance(PipelineState::Failed);
        err
    }

    /// Deadline hit while the run was still working
    fn expire(&mut self, deadline: Duration) -> PipelineError {
        log::warn!(
            "Batch exceeded its {:?} deadline during {}; outstanding invocations cancelled",
            deadline,
            self.state
        );
        self.fail(PipelineError::Timeout(deadline))
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Batch prediction pipeline. Cheap to share behind an `Arc`; one instance
/// serves every request so the worker bound is process-wide.
pub struct Pipeline {
    executor: FanOutExecutor,
    mode_features: Vec<String>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(registry: Arc<ModelRegistry>, config: PipelineConfig) -> Self {
        let mode_features = registry.mode_features();
        Self {
            executor: FanOutExecutor::new(registry, config.worker_limit),
            mode_features,
            config,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.executor.registry()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate a raw JSON payload, then run it
    pub async fn process(&self, payload: Value) -> PipelineResult<BatchResult> {
        let mut run = Run::start();
        let batch = Batch::from_value(payload, self.config.max_batch_len)
            .map_err(|err| run.fail(err.into()))?;
        self.run_within_deadline(&mut run, batch).await
    }

    /// Run an already-validated batch
    pub async fn run(&self, batch: Batch) -> PipelineResult<BatchResult> {
        let mut run = Run::start();
        if batch.len() > self.config.max_batch_len {
            let err = ShapeError::TooLong {
                len: batch.len(),
                max: self.config.max_batch_len,
            };
            return Err(run.fail(err.into()));
        }
        self.run_within_deadline(&mut run, batch).await
    }

    async fn run_within_deadline(&self, run: &mut Run, batch: Batch) -> PipelineResult<BatchResult> {
        let Some(deadline) = self.config.request_timeout else {
            return self.execute(run, batch).await;
        };

        let outcome = tokio::time::timeout(deadline, self.execute(run, batch)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => Err(run.expire(deadline)),
        }
    }

    async fn execute(&self, run: &mut Run, batch: Batch) -> PipelineResult<BatchResult> {
        run.advance(PipelineState::FanningOut);
        let mut per_reading = Vec::with_capacity(batch.len());
        for (index, reading) in batch.iter().enumerate() {
            match self.executor.run(reading).await {
                Ok(predictions) => per_reading.push(predictions),
                Err(err) => {
                    log::warn!("Reading {} of {} failed: {}", index, batch.len(), err);
                    return Err(run.fail(err));
                }
            }
        }

        run.advance(PipelineState::Aggregating);
        let predictions = aggregate_predictions(self.registry(), &per_reading)
            .map_err(|err| run.fail(err))?;
        let modes = extract_modes(&batch, &self.mode_features).map_err(|err| run.fail(err))?;
        let inputs = HealthInputs::from_modes(&modes).map_err(|err| run.fail(err))?;
        let analysis_summary = analyze(&inputs);

        run.advance(PipelineState::Done);
        log::info!(
            "Batch of {} readings processed: {}",
            batch.len(),
            analysis_summary.machine_condition
        );

        Ok(BatchResult {
            predictions,
            modes,
            analysis_summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        use PipelineState::*;
        assert!(Validating.can_transition_to(FanningOut));
        assert!(FanningOut.can_transition_to(Aggregating));
        assert!(Aggregating.can_transition_to(Done));
        assert!(FanningOut.can_transition_to(Failed));
        assert!(Validating.can_transition_to(Failed));
    }

    #[test]
    fn test_invalid_transitions() {
        use PipelineState::*;
        assert!(!Validating.can_transition_to(Done));
        assert!(!Done.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(FanningOut));
        assert!(!FanningOut.can_transition_to(Validating));
    }

    #[test]
    fn test_expired_run_ends_failed() {
        let mut run = Run::start();
        run.advance(PipelineState::FanningOut);

        let err = run.expire(Duration::from_millis(5));

        assert_eq!(run.state, PipelineState::Failed);
        assert!(matches!(err, PipelineError::Timeout(d) if d == Duration::from_millis(5)));
    }

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::Done.is_terminal());
        assert!(PipelineState::Failed.is_terminal());
        assert!(!PipelineState::Aggregating.is_terminal());
    }
}
