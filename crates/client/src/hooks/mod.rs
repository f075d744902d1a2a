//! Client-side hooks.

pub mod time;
pub mod use_capacity;
pub mod use_registration;

pub use use_capacity::use_capacity;
pub use use_registration::{use_registration, Registration};
