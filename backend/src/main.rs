//! chore-board - the household chore dashboard
//!
//! Serves today's board on one long-lived database handle. Without a
//! database there is nothing to show, so a failed connection at start-up
//! stops the process.

use std::sync::Arc;

use anyhow::Context;
use chore_board::{
    config::DashboardArgs,
    create_router,
    domain::SystemClock,
    initialize_backend,
    storage::DbConnection,
};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = DashboardArgs::parse();
    args.common.init_tracing();

    info!("Setting up database");
    let db = DbConnection::connect(&args.database.database_url, args.database.db_max_connections)
        .await
        .context("Could not connect to the database")?;

    let state = initialize_backend(db, Arc::new(SystemClock), args.common.weekday_locale());
    let app = create_router(state);

    info!("Starting server on {}", args.listen);
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!("Listening on {}", args.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
