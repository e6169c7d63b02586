//! Core types and definitions for the relief terrain viewer.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid and vertex types, constants, the error taxonomy and the viewer
//! configuration. It has no dependency on any windowing or GPU framework.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use error::{ReliefError, ReliefResult, ShaderStage};

#[cfg(test)]
mod tests;
