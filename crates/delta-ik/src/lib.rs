//! Configuration, reporting and batch processing for the `delta-ik` tool.

pub mod batch;
pub mod config;
pub mod report;
