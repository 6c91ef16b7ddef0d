//! Shared building blocks for the judge workspace: runtime configuration, judge settings
//! and the task schema types every other crate speaks.

pub mod config;
pub mod judge_settings;
pub mod task_spec;
