//! chore-scheduler - run the notifier every weekday morning
//!
//! Usage:
//!   chore-scheduler --notify-at 08:00
//!
//! Environment variables:
//!   NOTIFY_AT - local time of day (default: 08:00)
//!   CHECK_INTERVAL_SECS - seconds between checks (default: 60)
//!   NOTIFIER_BIN - notifier executable (default: chore-notifier beside this binary)

use chore_board::{
    config::SchedulerArgs,
    domain::{Clock, SystemClock},
    scheduler::{weekday_slots, ProcessJob, Scheduler},
};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let args = SchedulerArgs::parse();
    args.common.init_tracing();

    let notify_at = args.notify_time()?;
    let notifier = args.notifier_path();
    let clock = SystemClock;

    info!(
        "Scheduling {} Monday to Friday at {}",
        notifier.display(),
        notify_at.format("%H:%M")
    );
    let job = ProcessJob::new(notifier);

    let mut scheduler = Scheduler::new(weekday_slots(notify_at), clock.now());
    scheduler.run_forever(&clock, &job, args.check_interval()).await;

    Ok(())
}
