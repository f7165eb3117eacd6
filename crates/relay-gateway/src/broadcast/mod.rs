//! Event broadcasting
//!
//! Fans presence changes out to every other live connection.

mod notifier;

pub use notifier::PresenceNotifier;
