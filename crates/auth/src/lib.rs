//! Login flows and bearer-token lifecycle for stateful providers.
//!
//! [`TokenCache`] holds at most one token per provider together with its
//! local expiry. [`AuthManager`] sits in front of it and runs a provider's
//! [`Authenticator`](farelink_types::Authenticator) when the cached token is
//! missing or expired, serialising concurrent refreshes per provider.
//! Provider sub-modules hold the pure request/response shapes of each login.

pub mod cache;
pub mod flyhub;
pub mod manager;

pub use cache::TokenCache;
pub use manager::AuthManager;
