//! Data Transfer Objects
//!
//! Wire formats received from outside the process. These mirror the JSON
//! exactly and are converted into domain types before use.

pub mod webhook;
