//! `LISTEN`-based change feed.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tracing::{info, warn};

use crate::error::SyncError;
use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind, Table};

/// Pause before retrying after a listener error.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Notifications for one table, read from its `NOTIFY` channel.
pub struct PgChangeFeed {
    listener: PgListener,
    table: Table,
}

impl PgChangeFeed {
    /// Open a dedicated connection and `LISTEN` on the table's channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or `LISTEN` fails.
    pub async fn connect(pool: &PgPool, table: Table) -> Result<Self, SyncError> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(table.channel()).await?;
        info!(channel = table.channel(), "Listening for changes");
        Ok(Self { listener, table })
    }
}

#[async_trait]
impl ChangeFeed for PgChangeFeed {
    /// Waits for the next notification. When the connection drops, sqlx
    /// reconnects on the following call and anything sent in between is
    /// lost, so a lost connection is reported as an update to force a
    /// full reload.
    async fn next_event(&mut self) -> Option<ChangeEvent> {
        match self.listener.try_recv().await {
            Ok(Some(notification)) => Some(ChangeEvent::from_payload(
                notification.payload(),
                self.table,
            )),
            Ok(None) => {
                warn!(channel = self.table.channel(), "Change listener reconnecting");
                Some(ChangeEvent::new(ChangeKind::Update, self.table))
            }
            Err(e) => {
                warn!(channel = self.table.channel(), error = %e, "Change listener error");
                tokio::time::sleep(RETRY_DELAY).await;
                Some(ChangeEvent::new(ChangeKind::Update, self.table))
            }
        }
    }
}
