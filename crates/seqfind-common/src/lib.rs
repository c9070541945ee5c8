//! Seqfind Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, validation, and error handling for the seqfind workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all seqfind
//! workspace members:
//!
//! - **Error Handling**: the pipeline error taxonomy and result type
//! - **Logging**: tracing subscriber bootstrap shared by all binaries
//! - **Sequence**: alphabet validation for nucleotide/protein input and
//!   contact address validation
//!
//! # Example
//!
//! ```
//! use seqfind_common::sequence::{is_valid_sequence, SequenceKind};
//!
//! assert!(is_valid_sequence("ACGTacgt", SequenceKind::Nucleotide));
//! assert!(!is_valid_sequence("ACGU", SequenceKind::Nucleotide));
//! ```

pub mod error;
pub mod logging;
pub mod sequence;

// Re-export commonly used types
pub use error::{Result, SeqfindError};
