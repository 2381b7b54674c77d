//! # Scheduler
//!
//! Fires a job at fixed weekday/time slots, like a tiny in-process cron.
//!
//! Every slot remembers its next run. The first one is computed strictly
//! after start-up, so a run missed while the process was down is skipped
//! rather than caught up. A due slot runs once and is rescheduled to its next
//! occurrence after "now". Job failures are logged and never stop the loop.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Duration as ChronoDuration, NaiveDateTime, NaiveTime, Weekday};
use tracing::{error, info};

use crate::domain::clock::Clock;
use crate::error::{ChoreError, Result};

/// Work fired by the scheduler
#[async_trait]
pub trait Job: Send + Sync {
    async fn run(&self) -> Result<()>;
}

/// Runs an external program (the notifier) and waits for it to exit.
/// A non-zero exit status counts as a failure.
#[derive(Debug, Clone)]
pub struct ProcessJob {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessJob {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[async_trait]
impl Job for ProcessJob {
    async fn run(&self) -> Result<()> {
        info!("Running {}", self.program.display());

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .status()
            .await
            .map_err(|e| ChoreError::Job(format!("cannot start {}: {}", self.program.display(), e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(ChoreError::Job(format!("{} exited with {}", self.program.display(), status)))
        }
    }
}

/// Weekly recurrence: one weekday at one local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub weekday: Weekday,
    pub at: NaiveTime,
}

impl Slot {
    pub fn new(weekday: Weekday, at: NaiveTime) -> Self {
        Self { weekday, at }
    }

    /// First occurrence strictly after `now`
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let days_ahead = (self.weekday.num_days_from_monday() + 7
            - now.weekday().num_days_from_monday())
            % 7;
        let candidate = (now.date() + ChronoDuration::days(days_ahead as i64)).and_time(self.at);

        if candidate > now {
            candidate
        } else {
            candidate + ChronoDuration::days(7)
        }
    }
}

/// Monday to Friday at `at`
pub fn weekday_slots(at: NaiveTime) -> Vec<Slot> {
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        .into_iter()
        .map(|weekday| Slot::new(weekday, at))
        .collect()
}

/// Parse an `HH:MM` time of day
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ChoreError::Config(format!("invalid time of day '{}', expected HH:MM", value)))
}

#[derive(Debug, Clone)]
struct ScheduledSlot {
    slot: Slot,
    next_run: NaiveDateTime,
}

pub struct Scheduler {
    slots: Vec<ScheduledSlot>,
}

impl Scheduler {
    /// Register `slots`, scheduling each for its first occurrence after `now`
    pub fn new(slots: Vec<Slot>, now: NaiveDateTime) -> Self {
        let slots = slots
            .into_iter()
            .map(|slot| ScheduledSlot {
                slot,
                next_run: slot.next_after(now),
            })
            .collect();
        Self { slots }
    }

    /// Earliest upcoming run
    pub fn next_run(&self) -> Option<NaiveDateTime> {
        self.slots.iter().map(|s| s.next_run).min()
    }

    /// Run the job once for every slot that is due at `now`.
    /// Returns how many runs were attempted.
    pub async fn run_pending(&mut self, now: NaiveDateTime, job: &dyn Job) -> usize {
        let mut attempted = 0;

        for scheduled in self.slots.iter_mut() {
            if scheduled.next_run > now {
                continue;
            }

            attempted += 1;
            info!("[{}] Starting scheduled job", now.format("%H:%M:%S"));
            if let Err(e) = job.run().await {
                error!("Scheduled job failed: {}", e);
            }

            scheduled.next_run = scheduled.slot.next_after(now);
        }

        attempted
    }

    /// Check for due slots every `interval` until Ctrl-C
    pub async fn run_forever(&mut self, clock: &dyn Clock, job: &dyn Job, interval: Duration) {
        if let Some(next) = self.next_run() {
            info!("Scheduler started, next run at {}", next);
        }

        loop {
            self.run_pending(clock.now(), job).await;

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Scheduler stopping");
                    break;
                }
            }
        }
    }
}
