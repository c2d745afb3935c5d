use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinSet;

use super::Reporter;
use crate::error::{AlchemistError, Result};

/// Result of one scheduled task, tagged with its submission index.
#[derive(Debug)]
pub struct TaskOutcome<T> {
    pub index: usize,
    /// `Err` carries the panic message of a task that did not complete.
    pub result: std::result::Result<T, String>,
}

/// Runs tasks in consecutive batches of `width`, draining every task of a
/// batch before pausing `delay` and starting the next one.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    width: usize,
    delay: Duration,
}

impl BatchScheduler {
    pub fn new(width: usize, delay: Duration) -> Result<Self> {
        if width == 0 {
            return Err(AlchemistError::InvalidBatchWidth);
        }
        Ok(Self { width, delay })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of batches needed for `tasks` tasks.
    pub fn batch_count(&self, tasks: usize) -> usize {
        tasks.div_ceil(self.width)
    }

    /// Run `tasks` and return one outcome per task.
    ///
    /// Outcomes appear batch by batch, in completion order within a batch.
    /// No pause follows the final batch.
    pub async fn run<F, T>(&self, tasks: Vec<F>, reporter: &dyn Reporter) -> Vec<TaskOutcome<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let total = tasks.len();
        let batches = self.batch_count(total);
        let mut outcomes = Vec::with_capacity(total);
        let mut pending = tasks.into_iter().enumerate().peekable();
        let mut batch_no = 0;

        while pending.peek().is_some() {
            batch_no += 1;
            let mut set = JoinSet::new();
            let mut size = 0;
            for (index, task) in pending.by_ref().take(self.width) {
                set.spawn(async move {
                    let result = AssertUnwindSafe(task)
                        .catch_unwind()
                        .await
                        .map_err(panic_message);
                    TaskOutcome { index, result }
                });
                size += 1;
            }
            reporter.batch_started(batch_no, size);

            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => tracing::warn!(error = %e, "scheduled task aborted"),
                }
            }

            if batch_no < batches && !self.delay.is_zero() {
                reporter.pausing(self.delay);
                tokio::time::sleep(self.delay).await;
            }
        }

        outcomes
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
