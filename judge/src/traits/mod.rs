//!
//! Traits Module
//!
//! Seams of the judge, each with one reference implementation and room for more.
//!
//! - [`runner`]: loading user source into a callable solution (the isolation boundary).
//! - [`comparator`]: deciding whether a validated result matches the oracle's.
//! - [`oracle`]: the trusted reference implementation bound to a task.

pub mod comparator;
pub mod oracle;
pub mod runner;
