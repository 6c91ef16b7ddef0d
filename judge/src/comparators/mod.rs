//! # Comparators
//!
//! Strategies for deciding whether a user's numeric result matches the oracle's.
//!
//! - [`tolerance_comparator`]: hybrid absolute-or-relative tolerance, the default.

pub mod tolerance_comparator;
