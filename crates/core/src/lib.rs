//! `victory-core`: error model and identifiers shared by the domain crates.
//!
//! No infrastructure concerns live here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
