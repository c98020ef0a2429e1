//! Operations behind the `husk` commands. Each `ops_*` module takes explicit
//! paths, configuration and collaborators so it can run without a terminal.

pub mod installer;
pub mod ops_bundle;
pub mod ops_check;
pub mod ops_generate;
pub mod ops_get;
pub mod ops_install;
pub mod ops_lock;
pub mod ops_pack;
pub mod ops_publish;
pub mod ops_unpack;
pub mod vcs;
pub mod workspace;
