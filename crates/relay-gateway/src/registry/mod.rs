//! Presence tracking
//!
//! Maps registered identities to their live connection handles.

mod presence;

pub use presence::PresenceRegistry;
