//! Core trait abstractions.
//!
//! Applications implement these to plug in a text-generation backend.

pub mod completion;
