//! Package archives for husk.
//!
//! An [`Archive`](archive::Archive) is a flat, ordered set of files plus the
//! `husk.json` spec document, stored as a zip container. The same bytes are
//! used for distribution and for metadata introspection: an archive is also
//! a [`PackageSource`](husk_core::source::PackageSource), so package
//! metadata is derived straight from the in-memory entry table.

pub mod archive;
pub mod package;
