//! Decode/encode dispatch over the three supported representations
//!
//! Thin wrappers by design: YAML and JSON go straight to `serde_yaml` /
//! `serde_json` and surface those codecs' native errors; the JS module
//! format lives in [`script`].

pub mod script;

use serde::Serialize;
use serde_json::Value;

use crate::error::TransformResult;
use crate::options::{CanonicalOptions, Representation};

/// Decode `text` into a value according to `repr`.
pub fn decode(text: &str, repr: Representation) -> TransformResult<Value> {
    match repr {
        Representation::Json => Ok(serde_json::from_str(text)?),
        Representation::Yaml => Ok(serde_yaml::from_str(text)?),
        Representation::Js => script::decode(text),
    }
}

/// Encode `value` as text in the target representation.
///
/// The indent option governs JSON and JS output. serde_yaml exposes no
/// indentation knob and never emits anchors or aliases when serializing a
/// `Value`, so YAML output always spells out repeated structures in full.
pub fn encode(value: &Value, repr: Representation, options: &CanonicalOptions) -> TransformResult<String> {
    match repr {
        Representation::Json => encode_json(value, options.indent),
        Representation::Yaml => Ok(serde_yaml::to_string(value)?),
        Representation::Js => Ok(script::encode(value, options)),
    }
}

fn encode_json(value: &Value, indent: usize) -> TransformResult<String> {
    if indent == 0 {
        let mut text = serde_json::to_string(value)?;
        text.push('\n');
        return Ok(text);
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    out.push(b'\n');

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8(out).expect("serde_json output is UTF-8"))
}
