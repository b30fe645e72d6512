use crate::error::NotifyError;
use crate::notification::{Notification, NotificationDraft};
use chrono::Utc;
use gad_store::persist;
use std::path::PathBuf;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

/// What changed in the notification log.
///
/// Subscribers treat every variant the same way (re-fetch and re-render),
/// but the variant is kept for tracing and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Published { id: String },
    MarkedRead { id: String },
    Cleared,
}

/// Capacity of the refresh channel. Views refetch on every signal, so a
/// small buffer is enough; a lagging receiver only loses redundant wakeups.
const SIGNAL_CAPACITY: usize = 64;

/// Append-only notification log plus cross-view refresh signaling.
///
/// Prepend-to-front ordering (most recent first) is the only ordering
/// guarantee. The persisted list is rewritten whole on every mutation, like
/// the registry.
#[derive(Debug)]
pub struct NotificationBus {
    path: PathBuf,
    write_lock: Mutex<()>,
    signal: broadcast::Sender<BusEvent>,
}

impl NotificationBus {
    /// Open (creating the directory if needed) the log under `root`.
    ///
    /// # Errors
    /// Returns [`NotifyError::BadDirectory`] if `root` cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, NotifyError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|_| NotifyError::BadDirectory)?;
        let (signal, _) = broadcast::channel(SIGNAL_CAPACITY);
        Ok(Self {
            path: root.join("notifications.json"),
            write_lock: Mutex::new(()),
            signal,
        })
    }

    /// Assign id and date to `draft`, prepend it to the log, and wake
    /// subscribers.
    ///
    /// # Errors
    /// Propagates persistence failures; nothing is signaled in that case.
    pub async fn publish(&self, draft: NotificationDraft) -> Result<Notification, NotifyError> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            message: draft.message,
            date: Utc::now().format("%B %-d, %Y").to_string(),
            is_read: false,
            department: draft.department,
            target_url: draft.target_url,
        };

        {
            let _guard = self.write_lock.lock().await;
            let mut all = self.list().await?;
            all.insert(0, notification.clone());
            self.write_all(&all).await?;
        }

        tracing::info!(
            id = %notification.id,
            title = %notification.title,
            department = %notification.department,
            "notification published"
        );
        // No receivers is fine; views may simply not be open.
        let _ = self.signal.send(BusEvent::Published {
            id: notification.id.clone(),
        });
        Ok(notification)
    }

    /// Mark one entry read. Unknown ids are a no-op (the entry may have
    /// been cleared from another view between render and click).
    ///
    /// # Errors
    /// Propagates persistence failures.
    pub async fn mark_read(&self, id: &str) -> Result<(), NotifyError> {
        let mut changed = false;
        {
            let _guard = self.write_lock.lock().await;
            let mut all = self.list().await?;
            for n in &mut all {
                if n.id == id && !n.is_read {
                    n.is_read = true;
                    changed = true;
                }
            }
            if changed {
                self.write_all(&all).await?;
            }
        }

        if changed {
            let _ = self.signal.send(BusEvent::MarkedRead { id: id.to_string() });
        }
        Ok(())
    }

    /// Empty the log.
    ///
    /// # Errors
    /// Propagates persistence failures.
    pub async fn clear_all(&self) -> Result<(), NotifyError> {
        {
            let _guard = self.write_lock.lock().await;
            self.write_all(&[]).await?;
        }
        let _ = self.signal.send(BusEvent::Cleared);
        Ok(())
    }

    /// All notifications, most recent first. A missing file is an empty log.
    ///
    /// # Errors
    /// Propagates i/o and deserialization failures.
    pub async fn list(&self) -> Result<Vec<Notification>, NotifyError> {
        match persist::read_optional(&self.path).await? {
            Some(doc) => Ok(serde_json::from_slice(&doc)?),
            None => Ok(Vec::new()),
        }
    }

    /// Subscribe to refresh signals. Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.signal.subscribe()
    }

    async fn write_all(&self, all: &[Notification]) -> Result<(), NotifyError> {
        let doc = serde_json::to_vec(all)?;
        persist::write_atomic(&self.path, &doc).await?;
        Ok(())
    }
}
