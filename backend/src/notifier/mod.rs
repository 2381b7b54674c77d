//! # Chat Transport
//!
//! Outbound delivery of the daily digest. The notifier depends only on the
//! [`ChatTransport`] trait; [`telegram::TelegramTransport`] is the production
//! implementation.

pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;

/// Sends one formatted text message to a fixed destination
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}

pub use telegram::{TelegramConfig, TelegramTransport};
