//! Subcommand implementations.

pub mod catalog;
pub mod session;
pub mod validate;
