//! Row models and their public projections.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row, including
//!   internal bookkeeping columns
//! - A `Serialize` response struct, the only shape sent to clients
//! - `apply`, which merges a validated patch into an existing row

pub mod order;
pub mod user;
