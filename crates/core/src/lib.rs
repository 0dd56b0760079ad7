//! Domain types, errors, and payload schemas shared by the `db` and `api` crates.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod schema;
pub mod types;
pub mod validation;
