//! Core types and traits for the farelink workspace.
//!
//! This crate defines the shared abstractions used across every layer of the
//! travel provider gateway: the error type, provider identifiers, cached
//! bearer tokens, the canonical (provider-agnostic) request shapes, and the
//! async traits that each layer implements.

pub mod error;
pub mod provider;
pub mod search;
pub mod token;
pub mod traits;

pub use error::FarelinkError;
pub use provider::{Operation, ProviderId};
pub use search::{
    CabinClass, FlightSearchRequest, OfferPriceRequest, Passengers, Segment, TripType,
};
pub use token::{CachedToken, TokenState};
pub use traits::{
    Authenticator, Clock, FlightProvider, HttpCall, RequestTranslator, SystemClock, Transport,
};
