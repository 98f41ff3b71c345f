//! Path compilation for locating values in nested structures.
//!
//! This module provides [`CompiledPath`], a reusable extractor built once from a
//! dotted path string such as `search.0.name` and applied to any number of
//! target objects.

use std::fmt::{self, Display};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Any character outside word characters, `.` and `$` turns the whole path
/// into a single literal key.
static BAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.$]").unwrap());

/// A single segment of a dotted path.
///
/// The numeric form is parsed up front; whether it is used depends on the
/// container met during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    key: String,
    index: Option<usize>,
}

impl PathSegment {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            index: key.parse().ok(),
        }
    }

    /// Returns the raw key of this segment.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the segment as a sequence index, if it is numeric.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    fn step<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        match container {
            Value::Object(map) => map.get(&self.key),
            Value::Array(items) => self.index.and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Lookup {
    Literal,
    Segments(Vec<PathSegment>),
}

/// A dotted path compiled into a reusable extraction function.
///
/// # Example
///
/// ```rust
/// use shiver::CompiledPath;
/// use serde_json::json;
///
/// let obj = json!({"search": [{"name": "baidu"}], "results": {"baidu": {"post": 100}}});
///
/// assert_eq!(CompiledPath::compile("search.0.name").resolve(&obj), Some(&json!("baidu")));
/// assert_eq!(CompiledPath::compile("results.baidu.post").resolve(&obj), Some(&json!(100)));
/// assert_eq!(CompiledPath::compile("results.google.post").resolve(&obj), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledPath {
    source: String,
    lookup: Lookup,
}

impl CompiledPath {
    /// Compiles a path string.
    ///
    /// Paths made only of word characters, `.` and `$` are split on `.`.
    /// Anything else is kept whole and looked up as one literal key, which
    /// is the escape hatch for keys such as `"first name"` or `"a-b"`.
    pub fn compile(path: impl Into<String>) -> Self {
        let source = path.into();
        let lookup = if BAIL.is_match(&source) {
            Lookup::Literal
        } else {
            Lookup::Segments(source.split('.').map(PathSegment::new).collect())
        };
        Self { source, lookup }
    }

    /// Extracts the value at this path, or `None` when any step is missing.
    pub fn resolve<'a>(&self, object: &'a Value) -> Option<&'a Value> {
        match &self.lookup {
            Lookup::Literal => object.as_object()?.get(&self.source),
            Lookup::Segments(segments) => segments
                .iter()
                .try_fold(object, |current, segment| segment.step(current)),
        }
    }

    /// Returns the path string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the path is treated as a single literal key.
    pub fn is_literal(&self) -> bool {
        matches!(self.lookup, Lookup::Literal)
    }

    /// Returns the segments of a dotted path; empty for literal paths.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        let segments: &[PathSegment] = match &self.lookup {
            Lookup::Literal => &[],
            Lookup::Segments(segments) => segments,
        };
        segments.iter()
    }
}

impl Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compiles `path` into a [`CompiledPath`].
pub fn compile(path: impl Into<String>) -> CompiledPath {
    CompiledPath::compile(path)
}
