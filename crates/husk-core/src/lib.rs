//! Core data types for the husk package manager.
//!
//! This crate defines the types every other husk crate builds on: package
//! versions, the `husk.json` spec document and its validation, global
//! configuration with the import prefix map, and the package source
//! abstraction through which package metadata is read from a directory or
//! an archive alike.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod source;
pub mod spec;
pub mod version;
