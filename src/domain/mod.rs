//! Domain value objects and types.
//!
//! Type-safe wrappers for alert destinations, locations and channel kinds.
//! Value objects validate at construction time so invalid data never
//! reaches the dispatcher.

pub mod channel;
pub mod contact;
pub mod errors;
pub mod location;

pub use channel::ChannelKind;
pub use contact::Contact;
pub use errors::ValidationError;
pub use location::Location;
