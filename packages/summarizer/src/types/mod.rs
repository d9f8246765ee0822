//! Data types shared across the pipeline.

pub mod chunk;
pub mod completion;
pub mod config;
pub mod report;
pub mod summary;
pub mod trace;
