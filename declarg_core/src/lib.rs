//! Engine behind `declarg`.
//! See the `declarg` crate root for full details.
#![deny(missing_docs)]
mod api;
mod definition;
mod matcher;
mod model;

pub use api::*;
pub use definition::{compile, ConfigError, Vocabulary};
pub use matcher::Violation;
pub use model::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
