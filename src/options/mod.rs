//! Conversion options: raw caller input, resolution, and validation
//!
//! The resolver is the only component with real decision logic. It takes a
//! loosely-specified [`RawOptions`] record and produces a fully-resolved
//! [`CanonicalOptions`] that the reader and writer can execute without any
//! further checking, or a [`ValidationError`] listing every offending field.

pub mod identifier;
pub mod registry;

pub use identifier::is_valid_identifier;
pub use registry::Representation;

use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{ResolveResult, ValidationError, Violation};

/// Shared in-memory destination container.
///
/// The writer mutates this map in place as its "write" side effect; the
/// caller's clone of the `Arc` is their handle to the result. Concurrent
/// writers to the same container serialize on the mutex.
pub type SharedContainer = Arc<Mutex<serde_json::Map<String, Value>>>;

/// Create an empty in-memory destination container
pub fn new_container() -> SharedContainer {
    Arc::new(Mutex::new(serde_json::Map::new()))
}

/// Where the input value comes from
pub enum Source {
    /// Path to an existing file
    File(PathBuf),
    /// Readable byte stream, optionally carrying the path it was opened from
    /// (used for type inference only)
    Stream {
        reader: Box<dyn Read>,
        path: Option<PathBuf>,
    },
    /// An in-memory value supplied directly by the caller
    Value(Value),
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    pub fn stream(reader: impl Read + 'static) -> Self {
        Source::Stream {
            reader: Box::new(reader),
            path: None,
        }
    }

    pub fn stream_with_path(reader: impl Read + 'static, path: impl Into<PathBuf>) -> Self {
        Source::Stream {
            reader: Box::new(reader),
            path: Some(path.into()),
        }
    }

    pub fn value(value: Value) -> Self {
        Source::Value(value)
    }

    /// The path usable for type/destination inference, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::File(p) => Some(p),
            Source::Stream { path, .. } => path.as_deref(),
            Source::Value(_) => None,
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(p) => f.debug_tuple("File").field(p).finish(),
            Source::Stream { path, .. } => f.debug_struct("Stream").field("path", path).finish(),
            Source::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// Where the output goes
pub enum Destination {
    /// Path to write; parent directories are created on demand
    File(PathBuf),
    /// Writable byte stream, optionally carrying a path for type inference
    Stream {
        writer: Box<dyn Write>,
        path: Option<PathBuf>,
    },
    /// Caller-owned container mutated in place by the writer
    Object(SharedContainer),
}

impl Destination {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Destination::File(path.into())
    }

    pub fn stream(writer: impl Write + 'static) -> Self {
        Destination::Stream {
            writer: Box::new(writer),
            path: None,
        }
    }

    pub fn stream_with_path(writer: impl Write + 'static, path: impl Into<PathBuf>) -> Self {
        Destination::Stream {
            writer: Box::new(writer),
            path: Some(path.into()),
        }
    }

    pub fn object(container: SharedContainer) -> Self {
        Destination::Object(container)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Destination::File(p) => Some(p),
            Destination::Stream { path, .. } => path.as_deref(),
            Destination::Object(_) => None,
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File(p) => f.debug_tuple("File").field(p).finish(),
            Destination::Stream { path, .. } => {
                f.debug_struct("Stream").field("path", path).finish()
            }
            Destination::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Immutable defaults record, constructed once and passed explicitly into
/// [`resolve`] rather than referenced as ambient state.
#[derive(Debug, Clone, Copy)]
pub struct ResolveDefaults {
    /// Origin when no explicit value is given and no extension is usable
    pub origin: Representation,
    /// Target when no explicit value is given and no extension is usable
    pub target: Representation,
    pub indent: usize,
    pub min_indent: usize,
    pub max_indent: usize,
}

impl Default for ResolveDefaults {
    fn default() -> Self {
        Self {
            origin: Representation::Yaml,
            target: Representation::Js,
            indent: 2,
            min_indent: 0,
            max_indent: 8,
        }
    }
}

/// Caller-supplied, partially-specified conversion options.
///
/// Any field may be absent or inconsistent with the others; never used
/// directly by the reader/writer; always passed through [`resolve`] first.
#[derive(Debug, Default)]
pub struct RawOptions {
    pub src: Option<Source>,
    pub dest: Option<Destination>,
    pub origin: Option<String>,
    pub target: Option<String>,
    pub indent: Option<i64>,
    pub imports: Option<String>,
    pub exports: Option<String>,
    pub force: Option<bool>,
    pub strict: Option<bool>,
    pub es_module: Option<bool>,
    pub double_quote: Option<bool>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src(mut self, src: Source) -> Self {
        self.src = Some(src);
        self
    }

    pub fn dest(mut self, dest: Destination) -> Self {
        self.dest = Some(dest);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn indent(mut self, indent: i64) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn imports(mut self, name: impl Into<String>) -> Self {
        self.imports = Some(name.into());
        self
    }

    pub fn exports(mut self, name: impl Into<String>) -> Self {
        self.exports = Some(name.into());
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    pub fn es_module(mut self, es_module: bool) -> Self {
        self.es_module = Some(es_module);
        self
    }

    pub fn double_quote(mut self, double_quote: bool) -> Self {
        self.double_quote = Some(double_quote);
        self
    }
}

/// Fully-resolved conversion options.
///
/// Once constructed, a `CanonicalOptions` is guaranteed executable: the
/// reader and writer perform no further validation. `dest` may still be
/// `None` when the source offered no path to derive one from; that becomes
/// an error at write time only.
#[derive(Debug)]
pub struct CanonicalOptions {
    pub origin: Representation,
    pub target: Representation,
    pub src: Source,
    pub dest: Option<Destination>,
    pub indent: usize,
    pub imports: Option<String>,
    pub exports: Option<String>,
    pub force: bool,
    pub strict: bool,
    pub es_module: bool,
    pub double_quote: bool,
}

/// Check whether `path`, resolved against the working directory, names a
/// regular file. Advisory only: every OS-level error maps to `false`.
pub fn is_existing_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Resolve and validate raw options into a canonical record.
///
/// Fields are resolved in dependency order: `src` first, then `origin`
/// (which may be inferred from the source path), then `target` (which may
/// be inferred from the destination path), then `dest` (which may be
/// derived from the source path plus the resolved target). Violations
/// accumulate across fields so the caller sees every problem at once.
pub fn resolve(raw: RawOptions, defaults: &ResolveDefaults) -> ResolveResult<CanonicalOptions> {
    let mut violations = Vec::new();

    // 1. src: required; a string path must name an existing file
    let src = match raw.src {
        None => {
            violations.push(Violation::new("src", "missing src"));
            None
        }
        Some(Source::File(path)) => {
            if is_existing_file(&path) {
                Some(Source::File(path))
            } else {
                violations.push(Violation::new(
                    "src",
                    format!("src file '{}' does not exist", path.display()),
                ));
                None
            }
        }
        Some(other) => Some(other),
    };

    // 2. origin: explicit value wins; else infer from the source path
    // extension; an in-memory value has nothing to infer from and defaults
    // to js; streams without a path fall back to the default silently.
    let explicit_origin = parse_type_field("origin", raw.origin.as_deref(), &mut violations);
    let origin = explicit_origin.unwrap_or_else(|| match &src {
        Some(Source::Value(_)) => Representation::Js,
        Some(s) => s
            .path()
            .and_then(Representation::from_path)
            .unwrap_or(defaults.origin),
        None => defaults.origin,
    });

    // 3. target: symmetric to origin, inferring from the destination path
    let explicit_target = parse_type_field("target", raw.target.as_deref(), &mut violations);
    let target = explicit_target.unwrap_or_else(|| {
        raw.dest
            .as_ref()
            .and_then(|d| d.path())
            .and_then(Representation::from_path)
            .unwrap_or(defaults.target)
    });

    // 4. dest: when omitted, derive from the source path by swapping the
    // extension for the resolved target's. A source with no usable path
    // leaves dest undefined; that is only an error at write time.
    let dest = match raw.dest {
        Some(dest) => Some(dest),
        None => src
            .as_ref()
            .and_then(|s| s.path())
            .map(|p| Destination::File(p.with_extension(target.extension()))),
    };

    // 5. import/export identifiers
    for (field, name) in [("imports", &raw.imports), ("exports", &raw.exports)] {
        if let Some(name) = name {
            if !is_valid_identifier(name) {
                violations.push(Violation::new(
                    field,
                    format!("'{}' is not a valid identifier", name),
                ));
            }
        }
    }

    // 6. indent bounds
    let indent = match raw.indent {
        None => defaults.indent,
        Some(n) if n >= defaults.min_indent as i64 && n <= defaults.max_indent as i64 => n as usize,
        Some(n) => {
            violations.push(Violation::new(
                "indent",
                format!(
                    "indent {} out of range [{}, {}]",
                    n, defaults.min_indent, defaults.max_indent
                ),
            ));
            defaults.indent
        }
    };

    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    // a missing or non-existing src always pushed a violation above
    let src = match src {
        Some(src) => src,
        None => return Err(ValidationError::single("src", "missing src")),
    };

    Ok(CanonicalOptions {
        origin,
        target,
        src,
        dest,
        indent,
        imports: raw.imports,
        exports: raw.exports,
        force: raw.force.unwrap_or(false),
        strict: raw.strict.unwrap_or(false),
        es_module: raw.es_module.unwrap_or(false),
        double_quote: raw.double_quote.unwrap_or(false),
    })
}

fn parse_type_field(
    field: &'static str,
    value: Option<&str>,
    violations: &mut Vec<Violation>,
) -> Option<Representation> {
    match value {
        None => None,
        Some(s) => match s.parse() {
            Ok(repr) => Some(repr),
            Err(msg) => {
                violations.push(Violation::new(field, msg));
                None
            }
        },
    }
}
