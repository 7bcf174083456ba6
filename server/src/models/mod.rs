//! Domain records served by the API.

mod contact;

pub use contact::*;
