//! Error types and error handling for the front-end.
//!
//! This module defines the errors raised while lexing, parsing and
//! evaluating. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each phase
//! - The split between recoverable and fatal errors
//! - Helpful error messages and suggestions

pub mod errors;
