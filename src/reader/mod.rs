//! Decoding the source side of a resolved conversion

use std::io::Read;

use serde_json::Value;

use crate::codec;
use crate::error::{TransformError, TransformResult};
use crate::options::{CanonicalOptions, Source};

/// Decode the source named by `options` into a value.
///
/// File and stream sources are read fully, then decoded with the codec
/// matching the resolved origin. An in-memory source is cloned, so the
/// caller's value is never mutated by a read. When `imports` is set the
/// named top-level key of the decoded object is returned instead of the
/// whole value.
pub fn read(options: &mut CanonicalOptions) -> TransformResult<Value> {
    let value = match &mut options.src {
        Source::File(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| TransformError::io("reading", Some(path.clone()), e))?;
            codec::decode(&text, options.origin)?
        }
        Source::Stream { reader, path } => {
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .map_err(|e| TransformError::io("reading", path.clone(), e))?;
            codec::decode(&text, options.origin)?
        }
        Source::Value(value) => value.clone(),
    };

    match options.imports.as_deref() {
        Some(name) => select_import(value, name),
        None => Ok(value),
    }
}

fn select_import(value: Value, name: &str) -> TransformResult<Value> {
    match value {
        Value::Object(mut map) => map.remove(name).ok_or_else(|| TransformError::MissingImport {
            name: name.to_string(),
        }),
        _ => Err(TransformError::MissingImport {
            name: name.to_string(),
        }),
    }
}
