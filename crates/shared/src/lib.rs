//! Shared types and client-side domain logic for the WAY studio app.
//!
//! Everything in here is renderer-free: data models, the API error type,
//! the registration state machine, capacity lookups, and the pure decision
//! logic behind the schedule card's button and calendar. The Dioxus client
//! drives these; tests exercise them directly.

pub mod button;
pub mod calendar;
pub mod capacity;
pub mod error;
pub mod models;
pub mod registration;

pub use error::*;
pub use models::*;
