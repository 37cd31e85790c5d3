//! Request handlers, grouped by resource.

pub mod event;
pub mod invitee;
pub mod linking;
pub mod notification;
pub mod notify;
pub mod user;
