//! Job scheduling ports

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// A unit of background work
#[async_trait]
pub trait Job: Send + Sync {
    /// Stable job name, unique within a scheduler
    fn name(&self) -> &str;

    /// Run the job once
    async fn execute(&self) -> Result<()>;
}

/// When a job fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fire repeatedly, first after `initial_delay`, then every `every`
    Interval {
        /// Period between runs
        every: Duration,
        /// Delay before the first run
        initial_delay: Duration,
    },
    /// Fire once after `delay`
    Once {
        /// Delay before the run
        delay: Duration,
    },
}

impl Trigger {
    /// Periodic trigger firing immediately and then every `every`
    pub fn every(every: Duration) -> Self {
        Self::Interval {
            every,
            initial_delay: Duration::ZERO,
        }
    }

    /// One-shot trigger
    pub fn once_after(delay: Duration) -> Self {
        Self::Once { delay }
    }
}

/// Executes scheduled jobs
pub trait JobScheduler: Send + Sync {
    /// Add a job; jobs added after `start` begin running immediately
    fn schedule(&self, job: Arc<dyn Job>, trigger: Trigger) -> Result<()>;

    /// Begin running scheduled jobs
    fn start(&self) -> Result<()>;

    /// Stop every running job
    fn shutdown(&self);

    /// Whether `start` has been called and `shutdown` has not
    fn is_started(&self) -> bool;

    /// Names of scheduled jobs in scheduling order
    fn scheduled_jobs(&self) -> Vec<String>;
}

/// Produces the job scheduler
pub trait SchedulerFactory: Send + Sync {
    /// The scheduler instance
    fn scheduler(&self) -> Result<Arc<dyn JobScheduler>>;
}
