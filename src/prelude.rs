//! Prelude module for positional_date crate.
//!
//! Re-exports the derive macros from derive_more used across the rule types.

#[allow(unused_imports)]
pub use derive_more::{Display, From};
