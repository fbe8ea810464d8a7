//! Toko CLI library: configuration, catalog loading, rendering, and the
//! subcommands behind the `toko` binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog_file;
pub mod commands;
pub mod config;
pub mod render;
