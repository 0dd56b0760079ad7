//! Repository layer.
//!
//! Each repository is a zero-sized struct. Reads take `&PgPool`; writes take
//! `&mut PgConnection` so they run inside the caller's transaction.

pub mod order_repo;
pub mod user_repo;

pub use order_repo::OrderRepo;
pub use user_repo::UserRepo;
