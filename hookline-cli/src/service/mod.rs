//! Service layer
//!
//! Business logic of a handled webhook run. Services talk to the CI agent
//! only through the [`hookline_agent::Agent`] trait so they can be tested
//! against an in-memory fake.

mod extractor;
mod handler;

#[cfg(test)]
pub(crate) mod fake;

pub use extractor::extract;
pub use handler::{Outcome, WebhookHandler};
