//! Encoding and persisting the destination side of a resolved conversion

pub mod naming;

use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::codec;
use crate::error::{TransformError, TransformResult};
use crate::options::{CanonicalOptions, Destination, SharedContainer};

/// Encode `value` in the target representation and persist it.
///
/// The destination is consumed: file and stream destinations are written
/// and closed, an object destination is mutated in place (the caller's
/// clone of the container is their handle to the result. This is the one
/// sanctioned mutation of caller state). Returns a success message naming
/// the actual path written, which under collision avoidance may differ
/// from the requested one.
pub fn write(value: &Value, options: &mut CanonicalOptions) -> TransformResult<String> {
    let dest = options.dest.take().ok_or(TransformError::MissingDestination)?;

    match dest {
        Destination::Object(container) => {
            write_object(value, &container, options.exports.as_deref())
        }
        Destination::File(path) => {
            let text = codec::encode(value, options.target, options)?;
            write_file(&text, &path, options.force)
        }
        Destination::Stream { mut writer, path } => {
            let text = codec::encode(value, options.target, options)?;
            writer
                .write_all(text.as_bytes())
                .and_then(|_| writer.flush())
                .map_err(|e| TransformError::io("writing", path.clone(), e))?;
            Ok("Writing to stream successful".to_string())
        }
    }
}

fn write_file(text: &str, path: &Path, force: bool) -> TransformResult<String> {
    if path.is_dir() {
        return Err(TransformError::DestinationIsDirectory(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TransformError::io("creating directory", Some(parent.into()), e))?;
        }
    }

    let actual = if force {
        path.to_path_buf()
    } else {
        naming::collision_free(path)
    };
    std::fs::write(&actual, text)
        .map_err(|e| TransformError::io("writing", Some(actual.clone()), e))?;

    Ok(format!("Writing '{}' successful", actual.display()))
}

fn write_object(
    value: &Value,
    container: &SharedContainer,
    exports: Option<&str>,
) -> TransformResult<String> {
    let mut map = container.lock().unwrap_or_else(|e| e.into_inner());

    match exports {
        Some(name) => {
            map.insert(name.to_string(), value.clone());
        }
        None => match value {
            Value::Object(entries) => {
                for (k, v) in entries {
                    map.insert(k.clone(), v.clone());
                }
            }
            _ => return Err(TransformError::UnmergeableValue),
        },
    }

    Ok("Writing into destination object successful".to_string())
}
