//! Helper functions used across the application.
//!
//! - [`code_generator`] - short code generation and validation
//! - [`url_validator`] - syntactic URL shape checks

pub mod code_generator;
pub mod url_validator;
