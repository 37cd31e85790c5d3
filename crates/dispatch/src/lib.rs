//! Multi-channel notification dispatch.
//!
//! This crate provides the delivery half of the invitation subsystem:
//!
//! - [`ChannelSender`] — the capability one delivery medium implements,
//!   with concrete senders for email, WhatsApp deep links, social DMs,
//!   and in-app notifications.
//! - [`SenderRegistry`] — the sender lookup keyed by channel kind.
//! - [`NotificationRouter`] — fans one message out across an invitee's
//!   enabled channels, tolerating the independent failure of any of
//!   them.

pub mod message;
pub mod registry;
pub mod router;
pub mod sender;

pub use message::{DispatchAttempt, DispatchErrorCode, DispatchResult, NotificationMessage};
pub use registry::SenderRegistry;
pub use router::{NotificationRouter, RouterConfig};
pub use sender::ChannelSender;
