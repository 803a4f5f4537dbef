//! Client state: session, public view, and admin editors.
//!
//! DESIGN
//! ======
//! Nothing here renders. Each module is a plain state holder driven by the
//! `ContentApi` seam, so the same workflows back the CLI and the tests.

pub mod admin;
pub mod draft;
pub mod login;
pub mod public;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_helpers;
