use serde::{Deserialize, Serialize};

/// One delivered notification, as persisted in the log.
///
/// `department` is a routing hint for who should see the entry, `target_url`
/// is where clicking it navigates. Mutated only by the reader flipping
/// `is_read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub date: String,
    pub is_read: bool,
    pub department: String,
    pub target_url: String,
}

/// What a publisher supplies; the bus assigns id and date.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub department: String,
    pub target_url: String,
}

impl NotificationDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        department: impl Into<String>,
        target_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            department: department.into(),
            target_url: target_url.into(),
        }
    }
}
