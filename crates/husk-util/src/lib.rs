//! Pieces every husk crate leans on: [`errors::HuskError`], small filesystem
//! and hashing helpers, external commands, and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
