//! chore-notifier - post today's pending chores to the family chat
//!
//! Runs once and exits. A database failure aborts the run with a non-zero
//! exit status and nothing is sent; a delivery failure is logged and the run
//! still counts as complete.

use std::sync::Arc;

use anyhow::Context;
use chore_board::{
    config::NotifierArgs,
    domain::{NotificationService, NotifyOutcome, SystemClock},
    notifier::TelegramTransport,
    storage::DbConnection,
};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let args = NotifierArgs::parse();
    args.common.init_tracing();

    let db = DbConnection::connect(&args.database.database_url, args.database.db_max_connections)
        .await
        .context("Could not connect to the database")?;

    let transport = Arc::new(TelegramTransport::new(args.telegram.to_config()));
    let service = NotificationService::new(transport, Arc::new(SystemClock), args.common.weekday_locale());

    match service.run(db).await.context("Notifier run aborted")? {
        NotifyOutcome::Sent { children, chores } => {
            info!("Notification sent ({} chores, {} children)", chores, children)
        }
        outcome => info!("Notifier finished: {:?}", outcome),
    }

    Ok(())
}
