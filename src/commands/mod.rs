//! Command implementations
//!
//! Each user command is an `impl Repository` block under `porcelain`.

pub mod porcelain;
