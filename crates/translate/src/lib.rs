//! Request translators from canonical requests into provider dialects.
//!
//! This crate is the single place that knows how each provider spells
//! passenger counts, cabin classes, trip types and segments. All translators
//! are pure functions with no I/O; a request that cannot be expressed fails
//! with [`FarelinkError::Validation`](farelink_types::FarelinkError::Validation).

pub mod bdfare;
pub mod flyhub;
pub mod validate;

pub use bdfare::BdfareTranslator;
pub use flyhub::FlyhubTranslator;
pub use validate::{validate_price_request, validate_search_request};
