//! Dependency resolution for husk: constraint expressions and their
//! intersection, the constraint store behind lock and bundle documents,
//! reference parsing, and the FIFO worklist that fetches a package graph.

pub mod conflict;
pub mod dependencies;
pub mod dependency;
pub mod reference;
pub mod resolver;
