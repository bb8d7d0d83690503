//! Session lifecycle: the token cell shared with the gateway, durable token
//! persistence, and the store owning status/user state.
//! Keep the public surface thin and split implementation across sub-modules.

mod profile;
mod store;
mod token;

pub use profile::{ProfilePatch, UnitRef, UserProfile};
pub use store::{SessionSnapshot, SessionStatus, SessionStore};
pub use token::{BearerToken, TokenCell, TokenFile};
