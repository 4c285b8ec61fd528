//! Fan-Out Executor
//!
//! Runs every registered model on one reading through a bounded worker
//! pool and waits for all of them, or for the first failure.
//!
//! Input vectors are extracted up front in registry order, so a bad reading
//! always reports the first model (in registry order) that cannot read it.
//! Only the predictor calls themselves run concurrently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{PipelineError, PipelineResult};
use crate::logic::model::{ModelRegistry, Prediction};

use super::types::{Reading, ReadingPredictions};

/// Raised when the executor stops waiting, so queued invocations skip
/// their predictor call. Set on drop to cover deadline cancellation too.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

pub struct FanOutExecutor {
    registry: Arc<ModelRegistry>,
    permits: Arc<Semaphore>,
    worker_limit: usize,
}

impl FanOutExecutor {
    /// `worker_limit` bounds concurrent invocations across every reading and
    /// request that shares this executor.
    pub fn new(registry: Arc<ModelRegistry>, worker_limit: usize) -> Self {
        let worker_limit = worker_limit.max(1);
        Self {
            registry,
            permits: Arc::new(Semaphore::new(worker_limit)),
            worker_limit,
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn worker_limit(&self) -> usize {
        self.worker_limit
    }

    /// Predict one reading with every model.
    ///
    /// Returns the first error observed and abandons the remaining
    /// invocations without waiting for them.
    pub async fn run(&self, reading: &Reading) -> PipelineResult<ReadingPredictions> {
        let specs = self.registry.specs();

        let inputs = specs
            .iter()
            .map(|spec| spec.prepare(reading))
            .collect::<PipelineResult<Vec<Vec<f64>>>>()?;

        let cancel = CancelOnDrop(Arc::new(AtomicBool::new(false)));
        let mut tasks: JoinSet<PipelineResult<(usize, Prediction)>> = JoinSet::new();

        for (slot, (spec, input)) in specs.iter().zip(inputs).enumerate() {
            let spec = Arc::clone(spec);
            let permits = Arc::clone(&self.permits);
            let cancelled = Arc::clone(&cancel.0);

            tasks.spawn(async move {
                let permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Err(PipelineError::Internal("worker pool closed".to_string())),
                };

                let model = spec.name().to_string();
                let invocation = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    if cancelled.load(Ordering::Acquire) {
                        return None;
                    }
                    Some(spec.predict(&input))
                });

                match invocation.await {
                    Ok(Some(result)) => result.map(|prediction| (slot, prediction)),
                    // Only reachable after a sibling failed; nobody reads this
                    Ok(None) => Err(PipelineError::Internal(format!("{} cancelled", model))),
                    Err(err) => Err(PipelineError::Internal(format!(
                        "model '{}' did not complete: {}",
                        model, err
                    ))),
                }
            });
        }

        let mut slots: Vec<Option<Prediction>> = vec![None; specs.len()];
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|err| PipelineError::Internal(format!("fan-out task failed: {}", err)))
                .and_then(|result| result);

            match outcome {
                Ok((slot, prediction)) => slots[slot] = Some(prediction),
                Err(err) => {
                    cancel.0.store(true, Ordering::Release);
                    tasks.abort_all();
                    return Err(err);
                }
            }
        }

        specs
            .iter()
            .zip(slots)
            .map(|(spec, prediction)| {
                prediction
                    .map(|prediction| (spec.name().to_string(), prediction))
                    .ok_or_else(|| {
                        PipelineError::Internal(format!("model '{}' returned no result", spec.name()))
                    })
            })
            .collect()
    }
}
