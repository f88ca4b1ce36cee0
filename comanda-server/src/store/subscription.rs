//! Tab change subscription
//!
//! The store publishes the [`TabWrite`]s of each committed transaction to
//! every subscription's own unbounded channel. A [`TabSubscription`] turns
//! that raw feed into batches of changes relative to its query: a tab entering the query is `Added`, one changing while
//! inside it is `Modified`, one leaving it (or deleted) is `Removed`.

use futures::Stream;
use shared::models::{Tab, TabStatus};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One committed write: document state before and after
#[derive(Debug, Clone)]
pub struct TabWrite {
    pub before: Option<Tab>,
    pub after: Option<Tab>,
}

/// Filter for a subscription
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabQuery {
    pub status: Option<TabStatus>,
}

impl TabQuery {
    /// Every tab
    pub fn all() -> Self {
        Self { status: None }
    }

    /// Tabs with `status == status`
    pub fn status(status: TabStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn matches(&self, tab: &Tab) -> bool {
        self.status.is_none_or(|s| tab.status == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// A change relative to a query
#[derive(Debug, Clone)]
pub struct DocumentChange {
    pub kind: ChangeKind,
    /// Document after the write (before it, for `Removed`)
    pub tab: Tab,
}

impl DocumentChange {
    fn from_write(query: &TabQuery, write: TabWrite) -> Option<Self> {
        let was_in = write.before.as_ref().is_some_and(|t| query.matches(t));
        let is_in = write.after.as_ref().is_some_and(|t| query.matches(t));

        let (kind, tab) = match (was_in, is_in) {
            (false, true) => (ChangeKind::Added, write.after?),
            (true, true) => (ChangeKind::Modified, write.after?),
            (true, false) => (ChangeKind::Removed, write.before?),
            (false, false) => return None,
        };
        Some(Self { kind, tab })
    }
}

/// Cancellable subscription yielding change batches
///
/// ```ignore
/// let mut sub = store.subscribe_tabs(TabQuery::status(TabStatus::New));
/// while let Some(batch) = sub.next_batch().await {
///     for change in batch { /* ... */ }
/// }
/// ```
pub struct TabSubscription {
    query: TabQuery,
    rx: mpsc::UnboundedReceiver<Vec<TabWrite>>,
    cancel: CancellationToken,
}

impl TabSubscription {
    pub(super) fn new(
        query: TabQuery,
        rx: mpsc::UnboundedReceiver<Vec<TabWrite>>,
        cancel: CancellationToken,
    ) -> Self {
        Self { query, rx, cancel }
    }

    pub fn query(&self) -> TabQuery {
        self.query
    }

    /// Stop the subscription; `next_batch` returns `None` from now on
    pub fn unsubscribe(&self) {
        self.cancel.cancel();
    }

    /// Handle that unsubscribes from another task
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Wait for the next non-empty batch of changes
    ///
    /// A batch holds every write already committed when the first one is
    /// received. Returns `None` after unsubscribe or when the store's feed
    /// is gone.
    pub async fn next_batch(&mut self) -> Option<Vec<DocumentChange>> {
        loop {
            let first = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return None,
                received = self.rx.recv() => received?,
            };

            let mut batch = self.relative(first);
            while let Ok(writes) = self.rx.try_recv() {
                batch.extend(self.relative(writes));
            }

            if !batch.is_empty() {
                return Some(batch);
            }
        }
    }

    fn relative(&self, writes: Vec<TabWrite>) -> Vec<DocumentChange> {
        writes
            .into_iter()
            .filter_map(|write| DocumentChange::from_write(&self.query, write))
            .collect()
    }

    /// Consume into a stream of batches
    pub fn into_stream(self) -> impl Stream<Item = Vec<DocumentChange>> + Send {
        futures::stream::unfold(self, |mut sub| async move {
            sub.next_batch().await.map(|batch| (batch, sub))
        })
    }
}
