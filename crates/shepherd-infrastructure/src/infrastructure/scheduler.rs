//! Job scheduling on the tokio runtime

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::{Job, JobScheduler, SchedulerFactory, Trigger};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct ScheduledJob {
    job: Arc<dyn Job>,
    trigger: Trigger,
}

#[derive(Default)]
struct SchedulerState {
    jobs: Vec<ScheduledJob>,
    runtime: Option<Handle>,
    tasks: Vec<JoinHandle<()>>,
}

/// Runs jobs as tokio tasks
///
/// Jobs scheduled before [`start`](JobScheduler::start) wait for it; jobs
/// scheduled afterwards begin immediately. A failing run is logged and the
/// job fires again on its next tick.
pub struct TokioJobScheduler {
    state: Mutex<SchedulerState>,
    started: AtomicBool,
    cancel: Mutex<CancellationToken>,
}

impl TokioJobScheduler {
    /// Create a stopped scheduler
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SchedulerState::default()),
            started: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn token(&self) -> CancellationToken {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn spawn(
        runtime: &Handle,
        job: Arc<dyn Job>,
        trigger: Trigger,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        runtime.spawn(async move {
            match trigger {
                Trigger::Once { delay } => {
                    if wait(&token, delay).await {
                        run_job(job.as_ref()).await;
                    }
                }
                Trigger::Interval {
                    every,
                    initial_delay,
                } => {
                    if !wait(&token, initial_delay).await {
                        return;
                    }
                    let mut ticker = tokio::time::interval(every);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    loop {
                        tokio::select! {
                            () = token.cancelled() => break,
                            _ = ticker.tick() => run_job(job.as_ref()).await,
                        }
                    }
                }
            }
            debug!(job = job.name(), "Job task finished");
        })
    }
}

impl Default for TokioJobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleep for `delay` unless cancelled; returns whether the delay elapsed
async fn wait(token: &CancellationToken, delay: Duration) -> bool {
    if delay.is_zero() {
        return !token.is_cancelled();
    }
    tokio::select! {
        () = token.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}

async fn run_job(job: &dyn Job) {
    match job.execute().await {
        Ok(()) => debug!(job = job.name(), "Job run completed"),
        Err(err) => warn!(job = job.name(), error = %err, "Job run failed"),
    }
}

impl JobScheduler for TokioJobScheduler {
    fn schedule(&self, job: Arc<dyn Job>, trigger: Trigger) -> Result<()> {
        if let Trigger::Interval { every, .. } = trigger {
            if every.is_zero() {
                return Err(Error::scheduler(format!(
                    "job {} has a zero interval",
                    job.name()
                )));
            }
        }

        let mut state = self.state();
        if state.jobs.iter().any(|s| s.job.name() == job.name()) {
            return Err(Error::scheduler(format!(
                "job {} is already scheduled",
                job.name()
            )));
        }

        info!(job = job.name(), trigger = ?trigger, "Job scheduled");
        if let Some(runtime) = state.runtime.clone() {
            let task = Self::spawn(&runtime, Arc::clone(&job), trigger, self.token());
            state.tasks.push(task);
        }
        state.jobs.push(ScheduledJob { job, trigger });
        Ok(())
    }

    fn start(&self) -> Result<()> {
        let runtime = Handle::try_current()
            .map_err(|err| Error::scheduler(format!("no tokio runtime available: {err}")))?;
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::scheduler("scheduler is already started"));
        }

        let token = self.token();
        let mut state = self.state();
        let tasks: Vec<JoinHandle<()>> = state
            .jobs
            .iter()
            .map(|s| Self::spawn(&runtime, Arc::clone(&s.job), s.trigger, token.clone()))
            .collect();
        state.tasks.extend(tasks);
        state.runtime = Some(runtime);
        info!(jobs = state.jobs.len(), "Scheduler started");
        Ok(())
    }

    fn shutdown(&self) {
        if !self.started.swap(false, Ordering::SeqCst) {
            return;
        }
        let previous = std::mem::replace(
            &mut *self.cancel.lock().unwrap_or_else(PoisonError::into_inner),
            CancellationToken::new(),
        );
        previous.cancel();

        let mut state = self.state();
        state.runtime = None;
        let stopped = state.tasks.len();
        state.tasks.clear();
        info!(tasks = stopped, "Scheduler shut down");
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    fn scheduled_jobs(&self) -> Vec<String> {
        self.state()
            .jobs
            .iter()
            .map(|s| s.job.name().to_string())
            .collect()
    }
}

impl std::fmt::Debug for TokioJobScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioJobScheduler")
            .field("jobs", &self.scheduled_jobs())
            .field("started", &self.is_started())
            .finish()
    }
}

/// Hands out the single shared [`TokioJobScheduler`]
#[derive(Debug, Default)]
pub struct TokioSchedulerFactory {
    scheduler: Arc<TokioJobScheduler>,
}

impl TokioSchedulerFactory {
    /// Create a factory owning a fresh scheduler
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulerFactory for TokioSchedulerFactory {
    fn scheduler(&self) -> Result<Arc<dyn JobScheduler>> {
        let scheduler: Arc<dyn JobScheduler> = self.scheduler.clone();
        Ok(scheduler)
    }
}
