//! jyt: YAML / JSON / JavaScript module transformer
//!
//! Converts in-memory structured data between YAML, JSON, and a
//! JavaScript module-export format, reading from a file, stream, or
//! in-memory value and writing to a file, stream, or caller-owned object,
//! with an optional middleware step applied to the decoded value in
//! between. The core is the options resolver: it turns loosely-specified
//! raw options into a validated, internally-consistent configuration
//! before any I/O happens.

// Allow dead code for library exports that may not be used by the binary yet
#![allow(dead_code)]

pub mod cli;
pub mod codec;
pub mod error;
pub mod options;
pub mod reader;
pub mod transform;
pub mod writer;

// Re-export commonly used types
pub use error::{TransformError, TransformResult, ValidationError, Violation};
pub use options::{
    is_existing_file, is_valid_identifier, new_container, resolve, CanonicalOptions, Destination,
    RawOptions, Representation, ResolveDefaults, SharedContainer, Source,
};
pub use reader::read;
pub use transform::{transform, transform_with, transform_with_defaults};
pub use writer::write;
