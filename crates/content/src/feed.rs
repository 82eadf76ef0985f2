//! Change notifications and the reload-on-change listener.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Remote tables that publish change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    SiteSettings,
    PagesContent,
}

impl Table {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SiteSettings => "site_settings",
            Self::PagesContent => "pages_content",
        }
    }

    /// `NOTIFY` channel the table's trigger publishes on.
    #[must_use]
    pub const fn channel(self) -> &'static str {
        match self {
            Self::SiteSettings => "site_settings_changes",
            Self::PagesContent => "pages_content_changes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Payload of one row-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub event: ChangeKind,
    pub table: String,
    pub schema: String,
}

impl ChangeEvent {
    #[must_use]
    pub fn new(event: ChangeKind, table: Table) -> Self {
        Self {
            event,
            table: table.as_str().to_string(),
            schema: "public".to_string(),
        }
    }

    /// Decode a trigger payload. Anything unreadable still counts as an
    /// update of `table`, so the store reloads rather than missing it.
    #[must_use]
    pub fn from_payload(payload: &str, table: Table) -> Self {
        serde_json::from_str(payload).unwrap_or_else(|e| {
            warn!(channel = table.channel(), error = %e, "Unreadable change payload");
            Self::new(ChangeKind::Update, table)
        })
    }
}

/// Stream of change notifications for one table.
#[async_trait]
pub trait ChangeFeed: Send {
    /// Next event, or `None` once the feed is closed.
    async fn next_event(&mut self) -> Option<ChangeEvent>;
}

/// In-process feed, fed through the paired sender.
pub struct ChannelFeed {
    rx: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl ChannelFeed {
    #[must_use]
    pub fn channel() -> (mpsc::UnboundedSender<ChangeEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

#[async_trait]
impl ChangeFeed for ChannelFeed {
    async fn next_event(&mut self) -> Option<ChangeEvent> {
        self.rx.recv().await
    }
}

/// A store that can refetch its whole snapshot.
#[async_trait]
pub trait Reloadable: Send + Sync {
    fn name(&self) -> &'static str;

    async fn reload(&self);
}

/// Reload `store` once per event on `feed`, until the feed closes.
///
/// Events are handled one at a time; each triggers a full reload.
pub fn spawn_reload_on_change<S>(store: Arc<S>, mut feed: Box<dyn ChangeFeed>) -> JoinHandle<()>
where
    S: Reloadable + ?Sized + 'static,
{
    tokio::spawn(async move {
        info!(store = store.name(), "Change listener started");
        while let Some(event) = feed.next_event().await {
            debug!(store = store.name(), event = ?event.event, table = %event.table, "Change received, reloading");
            store.reload().await;
        }
        info!(store = store.name(), "Change feed closed");
    })
}
