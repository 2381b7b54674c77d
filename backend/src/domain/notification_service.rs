use std::sync::Arc;

use tracing::{error, info};

use crate::domain::clock::Clock;
use crate::domain::digest::{format_digest, group_by_child, DigestTemplate};
use crate::domain::weekday::{self, WeekdayLocale};
use crate::error::Result;
use crate::notifier::ChatTransport;
use crate::storage::{AssignmentRepository, DbConnection};

/// What a notifier run ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Saturday or Sunday, nothing was queried or sent
    RestDay,
    /// No chore is due today, nothing was sent
    NothingDue,
    Sent { children: usize, chores: usize },
    /// The transport refused the message; the run still counts as complete
    SendFailed,
}

/// One-shot daily digest: read today's chores, then post them to the chat
pub struct NotificationService {
    transport: Arc<dyn ChatTransport>,
    clock: Arc<dyn Clock>,
    locale: WeekdayLocale,
    template: DigestTemplate,
}

impl NotificationService {
    pub fn new(transport: Arc<dyn ChatTransport>, clock: Arc<dyn Clock>, locale: WeekdayLocale) -> Self {
        Self {
            transport,
            clock,
            locale,
            template: DigestTemplate::default(),
        }
    }

    pub fn with_template(mut self, template: DigestTemplate) -> Self {
        self.template = template;
        self
    }

    /// Run once. The connection is closed before the message goes out,
    /// so its lifetime never spans the network send.
    pub async fn run(&self, db: DbConnection) -> Result<NotifyOutcome> {
        let today = self.clock.today();

        let Some(day) = weekday::resolve(today, self.locale) else {
            info!("Weekend ({}), no notification", today);
            db.close().await;
            return Ok(NotifyOutcome::RestDay);
        };

        let entries = AssignmentRepository::new(db.clone())
            .actionable_entries(day.weekday, today)
            .await;
        db.close().await;
        let entries = entries?;

        let Some(message) = format_digest(&day.label, &entries, &self.template) else {
            info!("No chores scheduled for {}", day.label);
            return Ok(NotifyOutcome::NothingDue);
        };

        let children = group_by_child(&entries).len();
        match self.transport.send_message(&message).await {
            Ok(()) => {
                info!("Digest sent: {} chores for {} children", entries.len(), children);
                Ok(NotifyOutcome::Sent {
                    children,
                    chores: entries.len(),
                })
            }
            Err(e) => {
                error!("Failed to send digest: {}", e);
                Ok(NotifyOutcome::SendFailed)
            }
        }
    }
}
