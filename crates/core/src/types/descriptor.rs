//! Raw type descriptors as handed out by a reflection bridge.
//!
//! Accepted spellings:
//! - primitive keywords: `int`, `boolean`, `void`, ...
//! - class names: `java.lang.String`, `Ljava.lang.String;`, `Ljava/lang/String;`
//! - array descriptors: `[I`, `[[Ljava.lang.Object;`
//! - source spellings: `int[]`, `java.lang.Object[][]`
//!
//! Generic arguments are erased: `java.util.List<java.lang.String>` reads as
//! `java.util.List`.

use crate::error::{JavaMapError, Result};
use crate::model::ClassName;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Void,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Primitive::Boolean,
            "byte" => Primitive::Byte,
            "char" => Primitive::Char,
            "double" => Primitive::Double,
            "float" => Primitive::Float,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "short" => Primitive::Short,
            "void" => Primitive::Void,
            _ => return None,
        })
    }

    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'Z' => Primitive::Boolean,
            'B' => Primitive::Byte,
            'C' => Primitive::Char,
            'D' => Primitive::Double,
            'F' => Primitive::Float,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'S' => Primitive::Short,
            'V' => Primitive::Void,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Short => "short",
            Primitive::Void => "void",
        }
    }

    pub fn code(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Double => 'D',
            Primitive::Float => 'F',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Short => 'S',
            Primitive::Void => 'V',
        }
    }
}

/// Structured form of a raw descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(Primitive),
    Object(ClassName),
    /// `element` is never itself an array.
    Array { element: Box<JavaType>, depth: usize },
}

impl JavaType {
    pub fn parse(raw: &str) -> Result<Self> {
        let unsupported = || JavaMapError::UnsupportedType(raw.to_string());

        let erased = erase_generics(raw.trim()).ok_or_else(unsupported)?;
        let text = erased.as_str();
        if text.is_empty() {
            return Err(unsupported());
        }

        if text.starts_with('[') {
            let depth = text.chars().take_while(|&c| c == '[').count();
            let element = parse_field_element(&text[depth..]).ok_or_else(unsupported)?;
            return Ok(JavaType::Array {
                element: Box::new(element),
                depth,
            });
        }

        if let Some(base) = text.strip_suffix("[]") {
            let mut base = base;
            let mut depth = 1;
            while let Some(inner) = base.strip_suffix("[]") {
                base = inner;
                depth += 1;
            }
            let element = parse_plain(base.trim_end())
                .filter(|e| *e != JavaType::Primitive(Primitive::Void))
                .ok_or_else(unsupported)?;
            return Ok(JavaType::Array {
                element: Box::new(element),
                depth,
            });
        }

        if let Some(inner) = text.strip_prefix('L').and_then(|s| s.strip_suffix(';')) {
            return class_name(inner).map(JavaType::Object).ok_or_else(unsupported);
        }

        parse_plain(text).ok_or_else(unsupported)
    }

    pub fn object(name: impl Into<ClassName>) -> Self {
        JavaType::Object(name.into())
    }

    /// Wraps `self` in `dims` more array levels.
    pub fn array_of(self, dims: usize) -> Self {
        if dims == 0 {
            return self;
        }
        match self {
            JavaType::Array { element, depth } => JavaType::Array {
                element,
                depth: depth + dims,
            },
            element => JavaType::Array {
                element: Box::new(element),
                depth: dims,
            },
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Primitive(Primitive::Void))
    }

    /// The class this type mentions, looking through arrays.
    pub fn referenced_class(&self) -> Option<&ClassName> {
        match self {
            JavaType::Primitive(_) => None,
            JavaType::Object(name) => Some(name),
            JavaType::Array { element, .. } => element.referenced_class(),
        }
    }

    /// JVM descriptor: `I`, `Ljava/lang/Object;`, `[[J`.
    pub fn descriptor(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.code().to_string(),
            JavaType::Object(name) => format!("L{};", name.internal_name()),
            JavaType::Array { element, depth } => {
                format!("{}{}", "[".repeat(*depth), element.descriptor())
            }
        }
    }

    /// Reflection spelling (`Class#getName`): `int`, `java.lang.Object`, `[Ljava.lang.Object;`.
    pub fn reflection_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Object(name) => name.to_string(),
            JavaType::Array { element, depth } => {
                let element = match element.as_ref() {
                    JavaType::Primitive(p) => p.code().to_string(),
                    other => format!("L{};", other.reflection_name()),
                };
                format!("{}{}", "[".repeat(*depth), element)
            }
        }
    }

    /// Source spelling used in prototypes: `java.lang.Object[]`.
    pub fn java_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Object(name) => name.to_string(),
            JavaType::Array { element, depth } => {
                format!("{}{}", element.java_name(), "[]".repeat(*depth))
            }
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.java_name())
    }
}

/// Keyword or bare class name.
fn parse_plain(text: &str) -> Option<JavaType> {
    if let Some(p) = Primitive::from_keyword(text) {
        return Some(JavaType::Primitive(p));
    }
    class_name(text).map(JavaType::Object)
}

/// Element part of an array descriptor, after the `[` run.
fn parse_field_element(text: &str) -> Option<JavaType> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('L'), Some(_)) => text
            .strip_prefix('L')
            .and_then(|s| s.strip_suffix(';'))
            .and_then(class_name)
            .map(JavaType::Object),
        (Some(code), None) => Primitive::from_code(code)
            .filter(|p| *p != Primitive::Void)
            .map(JavaType::Primitive),
        _ => None,
    }
}

fn class_name(text: &str) -> Option<ClassName> {
    let name = ClassName::new(text);
    name.is_well_formed().then_some(name)
}

/// Drops every `<...>` group, or `None` when the brackets do not balance.
fn erase_generics(text: &str) -> Option<String> {
    if !text.contains('<') && !text.contains('>') {
        return Some(text.to_string());
    }
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    (depth == 0).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_and_class_names() {
        assert_eq!(
            JavaType::parse("int").unwrap(),
            JavaType::Primitive(Primitive::Int)
        );
        assert_eq!(
            JavaType::parse("java.lang.String").unwrap(),
            JavaType::object("java.lang.String")
        );
        assert_eq!(
            JavaType::parse("Ljava.lang.Object;").unwrap(),
            JavaType::object("java.lang.Object")
        );
        assert_eq!(
            JavaType::parse("Ljava/util/function/Consumer;").unwrap(),
            JavaType::object("java.util.function.Consumer")
        );
    }

    #[test]
    fn parses_array_descriptors() {
        let ty = JavaType::parse("[[I").unwrap();
        assert_eq!(
            ty,
            JavaType::Array {
                element: Box::new(JavaType::Primitive(Primitive::Int)),
                depth: 2
            }
        );
        assert_eq!(ty.descriptor(), "[[I");
        assert_eq!(ty.java_name(), "int[][]");

        let ty = JavaType::parse("[Ljava.lang.Object;").unwrap();
        assert_eq!(ty.descriptor(), "[Ljava/lang/Object;");
        assert_eq!(ty.reflection_name(), "[Ljava.lang.Object;");
        assert_eq!(ty.referenced_class().unwrap().as_str(), "java.lang.Object");
    }

    #[test]
    fn parses_source_array_spelling() {
        assert_eq!(
            JavaType::parse("java.lang.String[][]").unwrap(),
            JavaType::parse("[[Ljava.lang.String;").unwrap()
        );
    }

    #[test]
    fn erases_generic_arguments() {
        assert_eq!(
            JavaType::parse("java.util.Map<java.lang.String, java.util.List<E>>").unwrap(),
            JavaType::object("java.util.Map")
        );
    }

    #[test]
    fn rejects_malformed_descriptors() {
        for raw in ["", "[", "[Q", "[V", "[L;", "Ljava..Foo;", "java..Foo", "List<E", "void[]", "a b"] {
            let err = JavaType::parse(raw).unwrap_err();
            assert!(
                matches!(err, JavaMapError::UnsupportedType(_)),
                "{raw:?} should be unsupported"
            );
        }
    }

    #[test]
    fn descriptors_match_jvm_spelling() {
        assert_eq!(JavaType::parse("long").unwrap().descriptor(), "J");
        assert_eq!(JavaType::parse("boolean").unwrap().descriptor(), "Z");
        assert_eq!(JavaType::parse("void").unwrap().descriptor(), "V");
        assert_eq!(
            JavaType::parse("java.lang.Class").unwrap().descriptor(),
            "Ljava/lang/Class;"
        );
    }
}
