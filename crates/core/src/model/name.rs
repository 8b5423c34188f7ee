use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Words that cannot be used as a bare path segment in generated TypeScript.
const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

pub fn is_reserved_word(segment: &str) -> bool {
    RESERVED_WORDS.contains(&segment)
}

/// Appends `_` to a segment that collides with a reserved word.
pub fn escape_segment(segment: &str) -> String {
    if is_reserved_word(segment) {
        format!("{segment}_")
    } else {
        segment.to_string()
    }
}

/// A dotted, fully qualified class name such as `java.util.Iterator`.
///
/// Slashed binary names (`java/util/Iterator`) are normalized on
/// construction. Nested classes keep their `$` separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.contains('/') {
            Self(name.replace('/', "."))
        } else {
            Self(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Last dotted segment: `Iterator` for `java.util.Iterator`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dot, or `None` for an unqualified name.
    pub fn package_name(&self) -> Option<&str> {
        self.0.rfind('.').map(|idx| &self.0[..idx])
    }

    /// Slashed internal form used inside JVM descriptors.
    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Every segment is a valid Java identifier and there is at least one.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.segments().all(is_identifier)
    }

    /// Escapes path segments that collide with reserved words:
    /// `java.util.function.Function` becomes `java.util.function_.Function`.
    pub fn fix_class_path(&self) -> String {
        self.segments()
            .map(escape_segment)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Escaped package path, empty for an unqualified name.
    pub fn quoted_package_name(&self) -> String {
        self.package_name()
            .map(|pkg| {
                pkg.split('.')
                    .map(escape_segment)
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .unwrap_or_default()
    }

    /// Identifier-safe spelling of the whole path, used when short names collide.
    pub fn alias(&self) -> String {
        self.segments()
            .map(|segment| segment.replace('$', "_"))
            .collect::<Vec<_>>()
            .join("_")
    }
}

pub(crate) fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(value: &str) -> Self {
        ClassName::new(value)
    }
}

impl From<String> for ClassName {
    fn from(value: String) -> Self {
        ClassName::new(value)
    }
}

impl Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
