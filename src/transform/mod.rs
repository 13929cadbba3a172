//! The resolve → read → middleware → write pipeline
//!
//! Three sequential phases with no branching back: every failure is
//! terminal and reported to the caller as-is, with no retries anywhere.

use serde_json::Value;

use crate::error::TransformResult;
use crate::options::{resolve, RawOptions, ResolveDefaults};
use crate::{reader, writer};

/// Run the full pipeline with the value passed through unchanged.
pub fn transform(raw: RawOptions) -> TransformResult<String> {
    transform_with(raw, Ok)
}

/// Run the full pipeline, applying `middleware` to the decoded value
/// before it is written. The middleware may replace the value entirely;
/// its error terminates the pipeline before anything is written.
pub fn transform_with<F>(raw: RawOptions, middleware: F) -> TransformResult<String>
where
    F: FnOnce(Value) -> TransformResult<Value>,
{
    transform_with_defaults(raw, middleware, &ResolveDefaults::default())
}

/// Same as [`transform_with`], with an explicit defaults record instead of
/// the built-in one.
pub fn transform_with_defaults<F>(
    raw: RawOptions,
    middleware: F,
    defaults: &ResolveDefaults,
) -> TransformResult<String>
where
    F: FnOnce(Value) -> TransformResult<Value>,
{
    let mut options = resolve(raw, defaults)?;
    let value = reader::read(&mut options)?;
    let value = middleware(value)?;
    writer::write(&value, &mut options)
}
