//! Database module for PostgreSQL persistence.

mod contacts;
mod pool;

pub use contacts::*;
pub use pool::*;
