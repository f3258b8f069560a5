//! Utility functions shared by the application and API layers.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`url_validator`] - Long URL acceptance rules

pub mod code_generator;
pub mod url_validator;
