//! Client core for the Reletter diary-sharing service.
//!
//! The interesting part is the group-diary page: fetch the entries for a
//! `(group, date)`, count what the viewer had already read, then mark every
//! entry read. Everything talks to the remote API through [`api::DiaryApi`]
//! so the pipeline can be driven by fakes in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod identity;
pub mod marker;
pub mod notify;
pub mod page;
pub mod render;
pub mod session;
pub mod sidebar;
pub mod tally;

#[cfg(test)]
mod testing;

pub use error::{ClientError, Result};
