pub mod fallback;
pub mod order;
pub mod user;
