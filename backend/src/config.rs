//! Configuration for the three chore board processes
//!
//! Every setting can come from a command-line flag or an environment
//! variable; binaries load a `.env` file first. Secrets (database location,
//! bot token, chat id) are never compiled in.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use clap::{Args, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::weekday::WeekdayLocale;
use crate::error::Result;
use crate::notifier::telegram::{TelegramConfig, DEFAULT_API_BASE};
use crate::scheduler::parse_time_of_day;

/// Database connection settings
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:chores.db")]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "1")]
    pub db_max_connections: u32,
}

/// Weekday naming and logging shared by all processes
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Locale used for weekday labels (e.g. pt_BR.UTF-8, en_US)
    #[arg(long, env = "CHORE_LOCALE", default_value = "pt_BR.UTF-8")]
    pub locale: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl CommonArgs {
    pub fn weekday_locale(&self) -> WeekdayLocale {
        WeekdayLocale::resolve(&self.locale)
    }

    /// Install the global tracing subscriber. `RUST_LOG` wins over `--log-level`.
    pub fn init_tracing(&self) {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("chore_board={0},tower_http={0},info", self.log_level).into()
            }))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Telegram bot settings
#[derive(Args, Debug, Clone)]
pub struct TelegramArgs {
    /// Bot token issued by @BotFather
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: String,

    /// Destination chat id
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: String,

    /// Bot API base URL
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_API_BASE)]
    pub telegram_api_base: String,
}

impl TelegramArgs {
    pub fn to_config(&self) -> TelegramConfig {
        TelegramConfig::new(&self.telegram_bot_token, &self.telegram_chat_id)
            .with_api_base(&self.telegram_api_base)
    }
}

/// chore-board - household chore dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "chore-board")]
#[command(about = "Web dashboard for today's household chores")]
pub struct DashboardArgs {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:8501")]
    pub listen: SocketAddr,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// chore-notifier - send today's chore digest to the family chat
#[derive(Parser, Debug, Clone)]
#[command(name = "chore-notifier")]
#[command(about = "Posts today's pending chores to Telegram, then exits")]
pub struct NotifierArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// chore-scheduler - run the notifier every weekday morning
#[derive(Parser, Debug, Clone)]
#[command(name = "chore-scheduler")]
#[command(about = "Runs chore-notifier Monday to Friday at a fixed time")]
pub struct SchedulerArgs {
    /// Local time of day to notify (HH:MM)
    #[arg(long, env = "NOTIFY_AT", default_value = "08:00")]
    pub notify_at: String,

    /// Seconds between schedule checks
    #[arg(long, env = "CHECK_INTERVAL_SECS", default_value = "60")]
    pub check_interval_secs: u64,

    /// Path to the notifier executable (default: next to this binary)
    #[arg(long, env = "NOTIFIER_BIN")]
    pub notifier_bin: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SchedulerArgs {
    pub fn notify_time(&self) -> Result<NaiveTime> {
        parse_time_of_day(&self.notify_at)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs.max(1))
    }

    /// Resolve the notifier path, defaulting to `chore-notifier` beside the
    /// running executable
    pub fn notifier_path(&self) -> PathBuf {
        if let Some(path) = &self.notifier_bin {
            return path.clone();
        }

        let name = format!("chore-notifier{}", std::env::consts::EXE_SUFFIX);
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
