//! Reusable components.

pub mod schedule;
pub mod ui;
