//! Shared helpers.

pub mod guard;
