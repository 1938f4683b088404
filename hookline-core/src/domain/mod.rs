//! Domain types
//!
//! Validated, normalized representations used by the trigger policy and the
//! pipeline generator.

pub mod event;
pub mod pipeline;
pub mod provider;
