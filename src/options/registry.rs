//! Supported representation types and the extension-to-type mapping

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Textual representations the pipeline can read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// YAML document
    Yaml,
    /// JSON document
    Json,
    /// JavaScript module exporting a value
    Js,
}

impl Representation {
    /// Map a file extension to a representation type.
    ///
    /// Pure and total: unknown extensions yield `None` and the caller
    /// falls back to a default.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Representation::Yaml),
            "json" => Some(Representation::Json),
            "js" => Some(Representation::Js),
            _ => None,
        }
    }

    /// Infer a representation from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// The canonical file extension for this representation
    pub fn extension(&self) -> &'static str {
        match self {
            Representation::Yaml => "yaml",
            Representation::Json => "json",
            Representation::Js => "js",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Yaml => "yaml",
            Representation::Json => "json",
            Representation::Js => "js",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Representation::Yaml),
            "json" => Ok(Representation::Json),
            "js" => Ok(Representation::Js),
            other => Err(format!(
                "Invalid type '{}'. Use 'yaml', 'json', or 'js'",
                other
            )),
        }
    }
}
