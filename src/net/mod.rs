//! Networking: REST client and wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns every HTTP call to the backend; `types` defines the JSON shapes
//! exchanged with it.

pub mod api;
pub mod types;
