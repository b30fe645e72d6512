//! GAD Databank notification bus
//!
//! A fire-and-forget event log plus a refresh signal. The workflow engine
//! publishes here on submission and on resolution; open views subscribe so
//! they can re-project from the registry whenever the log changes.
//!
//! The bus is untyped and unfiltered: who gets to *see* a notification is a
//! read-side concern decided at display time from `department` and role,
//! never enforced here.
//!
//! Delivery of the refresh signal is best-effort fan-out. A subscriber that
//! lags far enough behind can miss events; since every event means exactly
//! "re-fetch and re-render", a missed event is repaired by the next one.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod bus;
mod error;
mod notification;

pub use bus::{BusEvent, NotificationBus};
pub use error::NotifyError;
pub use notification::{Notification, NotificationDraft};
